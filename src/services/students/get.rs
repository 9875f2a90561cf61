use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, student_error_response};
use crate::models::students::responses::StudentResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_detail_by_id(student_id).await {
        Ok(Some(student)) => Ok(
            HttpResponse::Ok().json(ApiResponse::success(StudentResponse { student }, "查询成功"))
        ),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生档案不存在",
        ))),
        Err(e) => Ok(student_error_response(&e)),
    }
}
