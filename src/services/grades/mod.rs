pub mod bulk;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod scope;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::GradelinkError;
use crate::models::grades::requests::{
    BulkCreateGradesRequest, CreateGradeRequest, GradeQueryParams, UpdateGradeRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 获取成绩列表
    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        query: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, query).await
    }

    // 根据成绩 ID 获取成绩
    pub async fn get_grade(&self, request: &HttpRequest, grade_id: i64) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, grade_id).await
    }

    // 录入成绩
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    // 批量录入成绩
    pub async fn bulk_create_grades(
        &self,
        request: &HttpRequest,
        bulk_data: BulkCreateGradesRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_create_grades(self, request, bulk_data).await
    }

    // 更新成绩
    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update_data).await
    }

    // 删除成绩
    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        grade_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }
}

/// 把存储层错误映射为统一响应
///
/// DuplicateKey / DependencyNotFound / Validation 是调用方可恢复的业务错误，
/// 必须以可识别的错误码返回，其余视为基础设施故障。
pub(crate) fn grade_error_response(err: &GradelinkError) -> HttpResponse {
    match err {
        GradelinkError::DuplicateKey(msg) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::GradeAlreadyExists, msg.clone()),
        ),
        GradelinkError::DependencyNotFound(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::GradeDependencyNotFound, msg.clone()),
        ),
        GradelinkError::Validation(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::GradeMarksInvalid, msg.clone()),
        ),
        GradelinkError::PermissionDenied(msg) => HttpResponse::Forbidden().json(
            ApiResponse::error_empty(ErrorCode::GradePermissionDenied, msg.clone()),
        ),
        GradelinkError::NotFound(msg) => HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::GradeNotFound, msg.clone()),
        ),
        other => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("成绩操作失败: {other}"),
        )),
    }
}

/// 把业务错误映射为批量录入的错误码
pub(crate) fn grade_error_code(err: &GradelinkError) -> ErrorCode {
    match err {
        GradelinkError::DuplicateKey(_) => ErrorCode::GradeAlreadyExists,
        GradelinkError::DependencyNotFound(_) => ErrorCode::GradeDependencyNotFound,
        GradelinkError::Validation(_) => ErrorCode::GradeMarksInvalid,
        GradelinkError::PermissionDenied(_) => ErrorCode::GradePermissionDenied,
        GradelinkError::NotFound(_) => ErrorCode::GradeNotFound,
        _ => ErrorCode::InternalServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_error_codes_distinguish_failures() {
        // 批量录入的失败原因必须逐条可识别，不得合并为一类
        assert_eq!(
            grade_error_code(&GradelinkError::duplicate_key("dup")),
            ErrorCode::GradeAlreadyExists
        );
        assert_eq!(
            grade_error_code(&GradelinkError::permission_denied("denied")),
            ErrorCode::GradePermissionDenied
        );
        assert_eq!(
            grade_error_code(&GradelinkError::validation("bad marks")),
            ErrorCode::GradeMarksInvalid
        );
        assert_eq!(
            grade_error_code(&GradelinkError::dependency_not_found("missing")),
            ErrorCode::GradeDependencyNotFound
        );
        assert_eq!(
            grade_error_code(&GradelinkError::database_connection("down")),
            ErrorCode::InternalServerError
        );
    }
}
