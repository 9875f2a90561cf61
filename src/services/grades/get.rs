use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_error_response, scope};
use crate::middlewares::RequireJWT;
use crate::models::grades::responses::GradeResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let scope = match scope::resolve_grade_scope(&storage, &current_user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => {
            // 越权访问统一返回拒绝，不回显记录内容
            if let Err(e) = scope::authorize_grade_read(&scope, &grade) {
                return Ok(grade_error_response(&e));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(GradeResponse { grade }, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "成绩不存在"))),
        Err(e) => Ok(grade_error_response(&e)),
    }
}
