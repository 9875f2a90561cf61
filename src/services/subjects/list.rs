use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, subject_error_response};
use crate::middlewares::RequireJWT;
use crate::models::subjects::requests::{SubjectListQuery, SubjectQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    query: SubjectQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let mut list_query = SubjectListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        class_id: query.class_id,
        teacher_id: query.teacher_id,
        search: query.search,
    };

    // 教师只能看到自己任课的科目
    if current_user.role == UserRole::Teacher {
        match storage.get_teacher_by_user_id(current_user.id).await {
            Ok(Some(teacher)) => list_query.teacher_id = Some(teacher.id),
            Ok(None) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SubjectPermissionDenied,
                    "当前用户没有教师档案",
                )));
            }
            Err(e) => return Ok(subject_error_response(&e)),
        }
    }

    match storage.list_subjects_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(subject_error_response(&e)),
    }
}
