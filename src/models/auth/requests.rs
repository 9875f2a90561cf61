use crate::models::users::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 注册时附带的学生档案信息
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterStudentProfile {
    pub student_no: String,
    pub class_id: i64,
    pub roll_number: String,
    // 格式 YYYY-MM-DD
    pub birth_date: String,
    pub address: String,
    pub guardian_name: String,
    pub guardian_contact: String,
}

// 注册时附带的教师档案信息
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterTeacherProfile {
    pub teacher_no: String,
    pub department: String,
    pub qualification: String,
    #[serde(default)]
    pub specializations: Vec<String>,
}

// 注册请求
//
// 注册学生角色时必须附带 student 档案，教师角色必须附带 teacher 档案；
// 用户与档案在同一个请求内创建。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub profile_name: String,
    pub student: Option<RegisterStudentProfile>,
    pub teacher: Option<RegisterTeacherProfile>,
}

// 更新个人资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
}

// 修改密码请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
