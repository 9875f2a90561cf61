use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, teacher_error_response};
use crate::models::{ApiResponse, ErrorCode};

/// 注销教师：停用关联用户账号，档案与名下成绩记录保留
pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_teacher(teacher_id).await {
        Ok(true) => {
            info!("Teacher profile {} deactivated", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教师已注销")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "教师档案不存在",
        ))),
        Err(e) => Ok(teacher_error_response(&e)),
    }
}
