use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ResultService, result_error_response};
use crate::errors::GradelinkError;
use crate::middlewares::RequireJWT;
use crate::models::results::responses::ResultListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_student_results(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 角色范围检查：教师/管理员可查任意学生，学生仅限本人，家长拒绝
    match current_user.role {
        UserRole::Admin | UserRole::Teacher => {}
        UserRole::Student => {
            let own = match storage.get_student_by_user_id(current_user.id).await {
                Ok(student) => student,
                Err(e) => return Ok(result_error_response(&e)),
            };
            if own.map(|s| s.id) != Some(student_id) {
                return Ok(result_error_response(&GradelinkError::permission_denied(
                    "只能查看自己的考试结果",
                )));
            }
        }
        UserRole::Parent => {
            return Ok(result_error_response(&GradelinkError::permission_denied(
                "家长账号暂不支持查看考试结果",
            )));
        }
    }

    match storage.list_results_by_student(student_id).await {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(ResultListResponse { items }, "查询成功"))),
        Err(e) => Ok(result_error_response(&e)),
    }
}
