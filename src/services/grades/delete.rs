use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, grade_error_response, scope};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_grade(
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

    // 先定位目标成绩，再做写授权
    let existing = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "成绩不存在")));
        }
        Err(e) => return Ok(grade_error_response(&e)),
    };

    if let Err(e) = scope::authorize_grade_write(&scope, existing.subject.id) {
        return Ok(grade_error_response(&e));
    }

    // 硬删除，无软删除标记
    match storage.delete_grade(grade_id).await {
        Ok(true) => {
            info!("Grade {} deleted by user {}", grade_id, current_user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("成绩删除成功")))
        }
        Ok(false) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::GradeNotFound, "成绩不存在"))),
        Err(e) => Ok(grade_error_response(&e)),
    }
}
