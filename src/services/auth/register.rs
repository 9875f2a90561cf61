use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::GradelinkError;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::users::entities::{UserProfile, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 基础字段校验
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let RegisterRequest {
        username,
        email,
        password,
        role,
        profile_name,
        student: student_profile,
        teacher: teacher_profile,
    } = register_request;

    // 2. 角色档案完整性校验：学生/教师注册必须附带对应档案
    match role {
        UserRole::Student if student_profile.is_none() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "学生注册必须附带 student 档案信息",
            )));
        }
        UserRole::Teacher if teacher_profile.is_none() => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "教师注册必须附带 teacher 档案信息",
            )));
        }
        UserRole::Admin => {
            // 管理员账号只能由现有管理员通过用户管理接口创建
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "不允许通过注册接口创建管理员账号",
            )));
        }
        _ => {}
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    // 4. 创建用户
    let user_request = CreateUserRequest {
        username,
        email,
        password: password_hash,
        role: role.clone(),
        profile: UserProfile {
            profile_name,
            avatar_url: None,
        },
    };

    let user = match storage.create_user(user_request).await {
        Ok(user) => user,
        Err(GradelinkError::DuplicateKey(msg)) => {
            return Ok(HttpResponse::Conflict()
                .json(ApiResponse::error_empty(ErrorCode::UserAlreadyExists, msg)));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("注册失败: {e}"),
                )),
            );
        }
    };

    // 5. 创建角色档案；失败时回收刚创建的用户，避免留下孤儿账号
    let profile_result = match (&role, student_profile, teacher_profile) {
        (UserRole::Student, Some(profile), _) => storage
            .create_student(CreateStudentRequest {
                user_id: user.id,
                student_no: profile.student_no,
                class_id: profile.class_id,
                roll_number: profile.roll_number,
                birth_date: profile.birth_date,
                address: profile.address,
                guardian_name: profile.guardian_name,
                guardian_contact: profile.guardian_contact,
            })
            .await
            .map(|_| ()),
        (UserRole::Teacher, _, Some(profile)) => storage
            .create_teacher(CreateTeacherRequest {
                user_id: user.id,
                teacher_no: profile.teacher_no,
                department: profile.department,
                qualification: profile.qualification,
                specializations: profile.specializations,
            })
            .await
            .map(|_| ()),
        // 家长注册暂不关联档案
        _ => Ok(()),
    };

    if let Err(e) = profile_result {
        error!(
            "Profile creation failed during register, rolling back user {}: {}",
            user.id, e
        );
        let _ = storage.delete_user(user.id).await;
        return Ok(match &e {
            GradelinkError::DuplicateKey(_) => HttpResponse::Conflict().json(
                ApiResponse::error_empty(ErrorCode::StudentAlreadyExists, format!("注册失败: {e}")),
            ),
            GradelinkError::DependencyNotFound(_) | GradelinkError::DateParse(_) => {
                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("注册失败: {e}"),
                ))
            }
            _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        });
    }

    info!("User {} registered with role {}", user.username, user.role);
    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
}

