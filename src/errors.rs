//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_gradelink_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GradelinkError {
            $($variant(String),)*
        }

        impl GradelinkError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradelinkError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradelinkError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradelinkError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradelinkError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradelinkError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_gradelink_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    DuplicateKey("E008", "Duplicate Key Error"),
    DependencyNotFound("E009", "Dependency Not Found"),
    PermissionDenied("E010", "Permission Denied"),
    Serialization("E011", "Serialization Error"),
    DateParse("E012", "Date Parse Error"),
    Authentication("E013", "Authentication Error"),
}

impl GradelinkError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GradelinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradelinkError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradelinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束和外键约束是业务层需要识别的错误，单独映射
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                GradelinkError::DuplicateKey(msg)
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                GradelinkError::DependencyNotFound(msg)
            }
            _ => GradelinkError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for GradelinkError {
    fn from(err: std::io::Error) -> Self {
        GradelinkError::DatabaseConnection(err.to_string())
    }
}

impl From<serde_json::Error> for GradelinkError {
    fn from(err: serde_json::Error) -> Self {
        GradelinkError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for GradelinkError {
    fn from(err: chrono::ParseError) -> Self {
        GradelinkError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradelinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradelinkError::cache_connection("test").code(), "E001");
        assert_eq!(GradelinkError::database_config("test").code(), "E003");
        assert_eq!(GradelinkError::validation("test").code(), "E006");
        assert_eq!(GradelinkError::duplicate_key("test").code(), "E008");
        assert_eq!(GradelinkError::permission_denied("test").code(), "E010");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradelinkError::duplicate_key("test").error_type(),
            "Duplicate Key Error"
        );
        assert_eq!(
            GradelinkError::dependency_not_found("test").error_type(),
            "Dependency Not Found"
        );
        assert_eq!(
            GradelinkError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = GradelinkError::validation("Marks out of range");
        assert_eq!(err.message(), "Marks out of range");
    }

    #[test]
    fn test_format_simple() {
        let err = GradelinkError::permission_denied("not your subject");
        let formatted = err.format_simple();
        assert!(formatted.contains("Permission Denied"));
        assert!(formatted.contains("not your subject"));
    }
}
