use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, grade_error_response, scope};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 获取当前用户信息
    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 解析访问范围并叠加到查询条件
    let scope = match scope::resolve_grade_scope(&storage, &current_user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    let list_query = GradeListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student_id,
        subject_id: query.subject_id,
        subject_ids: None,
        term: query.term,
        academic_year: query.academic_year,
    };

    let scoped_query = match scope::scoped_list_query(&scope, list_query) {
        Ok(q) => q,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    match storage.list_grades_with_pagination(scoped_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(grade_error_response(&e)),
    }
}
