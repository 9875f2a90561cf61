pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::GradelinkError;
use crate::models::results::requests::CreateResultRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ResultService {
    storage: Option<Arc<dyn Storage>>,
}

impl ResultService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 录入考试结果
    pub async fn create_result(
        &self,
        request: &HttpRequest,
        result_data: CreateResultRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_result(self, request, result_data).await
    }

    // 查询某学生的考试结果
    pub async fn list_student_results(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_student_results(self, request, student_id).await
    }
}

/// 考试结果模块错误映射
pub(crate) fn result_error_response(err: &GradelinkError) -> HttpResponse {
    match err {
        GradelinkError::DuplicateKey(msg) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ResultAlreadyExists, msg.clone()),
        ),
        GradelinkError::DependencyNotFound(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ResultCreationFailed, msg.clone()),
        ),
        GradelinkError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg.clone())),
        GradelinkError::PermissionDenied(msg) => HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::ResultPermissionDenied, msg.clone()),
        ),
        other => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("考试结果操作失败: {other}"),
        )),
    }
}
