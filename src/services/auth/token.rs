use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::responses::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 使用 refresh token cookie 换取新的 access token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::TokenInvalid,
            "Missing refresh token",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                "Invalid or expired refresh token",
            )))
        }
    }
}

/// 验证当前 access token 是否有效
///
/// 能通过 RequireJWT 中间件到达这里即视为有效。
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let is_valid = RequireJWT::extract_user_claims(request).is_some();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid },
        "Token verification completed",
    )))
}

/// 获取当前用户信息，附带角色专属档案
pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
    };

    let mut response = UserInfoResponse {
        user,
        student_profile: None,
        teacher_profile: None,
    };

    // 附带角色专属档案
    match response.user.role {
        UserRole::Student => {
            if let Ok(Some(student)) = storage.get_student_by_user_id(response.user.id).await
                && let Ok(detail) = storage.get_student_detail_by_id(student.id).await
            {
                response.student_profile = detail;
            }
        }
        UserRole::Teacher => {
            if let Ok(Some(teacher)) = storage.get_teacher_by_user_id(response.user.id).await
                && let Ok(detail) = storage.get_teacher_detail_by_id(teacher.id).await
            {
                response.teacher_profile = detail;
            }
        }
        _ => {}
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
