//! 业务错误码定义
//!
//! 错误码按模块分段：
//! - 0: 成功
//! - 1xxx: 通用错误
//! - 2xxx: 认证与用户
//! - 3xxx: 业务模块（学生/教师/班级/科目/成绩/考试结果）

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    RateLimitExceeded = 1004,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    TokenInvalid = 2002,
    PasswordIncorrect = 2003,

    // 用户
    UserNotFound = 2100,
    UserAlreadyExists = 2101,
    UserNameInvalid = 2102,
    UserEmailInvalid = 2103,
    UserPasswordInvalid = 2104,
    UserNameAlreadyExists = 2105,
    UserEmailAlreadyExists = 2106,
    UserCreationFailed = 2107,
    UserUpdateFailed = 2108,
    UserDeleteFailed = 2109,
    CanNotDeleteCurrentUser = 2110,

    // 学生
    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    StudentCreationFailed = 3002,
    StudentUpdateFailed = 3003,

    // 教师
    TeacherNotFound = 3100,
    TeacherAlreadyExists = 3101,
    TeacherCreationFailed = 3102,
    TeacherUpdateFailed = 3103,

    // 班级
    ClassNotFound = 3200,
    ClassAlreadyExists = 3201,
    ClassCreationFailed = 3202,
    ClassUpdateFailed = 3203,
    ClassDeleteFailed = 3204,
    ClassPermissionDenied = 3205,

    // 科目
    SubjectNotFound = 3300,
    SubjectAlreadyExists = 3301,
    SubjectCreationFailed = 3302,
    SubjectUpdateFailed = 3303,
    SubjectPermissionDenied = 3304,

    // 成绩
    GradeNotFound = 3400,
    GradeAlreadyExists = 3401,
    GradeCreationFailed = 3402,
    GradeUpdateFailed = 3403,
    GradeDeleteFailed = 3404,
    GradePermissionDenied = 3405,
    GradeMarksInvalid = 3406,
    GradeDependencyNotFound = 3407,

    // 考试结果（简化评分方案）
    ResultNotFound = 3500,
    ResultAlreadyExists = 3501,
    ResultCreationFailed = 3502,
    ResultPermissionDenied = 3503,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::GradeAlreadyExists as i32, 3401);
        assert_eq!(ErrorCode::GradePermissionDenied as i32, 3405);
    }
}
