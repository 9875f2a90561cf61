use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_error_response};
use crate::middlewares::RequireJWT;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let mut list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        teacher_id: None,
        academic_year: query.academic_year,
        search: query.search,
    };

    // 教师只能看到自己名下的班级，管理员不受限
    if current_user.role == UserRole::Teacher {
        match storage.get_teacher_by_user_id(current_user.id).await {
            Ok(Some(teacher)) => list_query.teacher_id = Some(teacher.id),
            Ok(None) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ClassPermissionDenied,
                    "当前用户没有教师档案",
                )));
            }
            Err(e) => return Ok(class_error_response(&e)),
        }
    }

    match storage.list_classes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(class_error_response(&e)),
    }
}
