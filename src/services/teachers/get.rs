use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_error_response};
use crate::models::teachers::responses::TeacherResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_detail_by_id(teacher_id).await {
        Ok(Some(teacher)) => Ok(
            HttpResponse::Ok().json(ApiResponse::success(TeacherResponse { teacher }, "查询成功"))
        ),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "教师档案不存在",
        ))),
        Err(e) => Ok(teacher_error_response(&e)),
    }
}
