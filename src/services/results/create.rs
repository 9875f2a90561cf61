use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ResultService, result_error_response};
use crate::models::results::requests::CreateResultRequest;
use crate::models::results::responses::ResultResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_academic_year;

pub async fn create_result(
    service: &ResultService,
    request: &HttpRequest,
    result_data: CreateResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_academic_year(&result_data.session) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 平时分与考试分都不允许为负
    if result_data.ca < 0.0 || result_data.exam < 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "平时分和考试分不能为负数",
        )));
    }

    match storage.create_result(result_data).await {
        Ok(result) => {
            info!(
                "Exam result {} recorded for student {}",
                result.id, result.student_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(ResultResponse { result }, "考试结果录入成功")))
        }
        Err(e) => Ok(result_error_response(&e)),
    }
}
