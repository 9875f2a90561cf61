use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, teacher_error_response};
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if teacher_data.teacher_no.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "工号不能为空",
        )));
    }

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher profile {} created", teacher.teacher_no);
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "教师档案创建成功")))
        }
        Err(e) => Ok(teacher_error_response(&e)),
    }
}
