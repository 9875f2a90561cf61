use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, grade_error_response, scope};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::grades::responses::GradeResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 写操作必须先通过范围解析
    let scope = match scope::resolve_grade_scope(&storage, &current_user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    if let Err(e) = scope::authorize_grade_write(&scope, grade_data.subject_id) {
        return Ok(grade_error_response(&e));
    }

    let teacher_id = match scope::resolve_grading_teacher(&scope, grade_data.teacher_id) {
        Ok(id) => id,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    match storage.create_grade(teacher_id, grade_data).await {
        Ok(grade) => {
            info!(
                "Grade {} created for student {} by user {}",
                grade.id, grade.student.id, current_user.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(GradeResponse { grade }, "成绩录入成功")))
        }
        Err(e) => Ok(grade_error_response(&e)),
    }
}
