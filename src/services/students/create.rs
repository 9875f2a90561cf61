use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, student_error_response};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if student_data.student_no.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "学号不能为空",
        )));
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student profile {} created", student.student_no);
            Ok(HttpResponse::Created().json(ApiResponse::success(student, "学生档案创建成功")))
        }
        Err(e) => Ok(student_error_response(&e)),
    }
}
