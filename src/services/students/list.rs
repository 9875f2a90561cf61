use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_error_response};
use crate::models::students::requests::{StudentListQuery, StudentQueryParams};
use crate::models::ApiResponse;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = StudentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        class_id: query.class_id,
        search: query.search,
    };

    match storage.list_students_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(student_error_response(&e)),
    }
}
