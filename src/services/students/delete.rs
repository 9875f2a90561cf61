use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, student_error_response};
use crate::models::{ApiResponse, ErrorCode};

/// 注销学生：停用关联用户账号，档案与历史成绩保留
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_student(student_id).await {
        Ok(true) => {
            info!("Student profile {} deactivated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已注销，历史成绩保留")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "学生档案不存在",
        ))),
        Err(e) => Ok(student_error_response(&e)),
    }
}
