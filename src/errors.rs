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
macro_rules! define_edumanage_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduManageError {
            $($variant(String),)*
        }

        impl EduManageError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduManageError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduManageError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduManageError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduManageError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduManageError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edumanage_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    DocumentRender("E013", "Document Render Error"),
    PaymentGateway("E014", "Payment Gateway Error"),
    SignatureVerification("E015", "Signature Verification Error"),
}

impl EduManageError {
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

impl fmt::Display for EduManageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduManageError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for EduManageError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduManageError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduManageError {
    fn from(err: std::io::Error) -> Self {
        EduManageError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduManageError {
    fn from(err: serde_json::Error) -> Self {
        EduManageError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduManageError {
    fn from(err: chrono::ParseError) -> Self {
        EduManageError::DateParse(err.to_string())
    }
}

impl From<printpdf::Error> for EduManageError {
    fn from(err: printpdf::Error) -> Self {
        EduManageError::DocumentRender(err.to_string())
    }
}

impl From<reqwest::Error> for EduManageError {
    fn from(err: reqwest::Error) -> Self {
        EduManageError::PaymentGateway(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduManageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduManageError::cache_connection("test").code(), "E001");
        assert_eq!(EduManageError::database_config("test").code(), "E003");
        assert_eq!(EduManageError::validation("test").code(), "E007");
        assert_eq!(EduManageError::authentication("test").code(), "E011");
        assert_eq!(EduManageError::document_render("test").code(), "E013");
        assert_eq!(EduManageError::payment_gateway("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduManageError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            EduManageError::validation("test").error_type(),
            "Validation Error"
        );
        assert_eq!(
            EduManageError::signature_verification("test").error_type(),
            "Signature Verification Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduManageError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = EduManageError::validation("Invalid day of week");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid day of week"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "receipt missing");
        let err: EduManageError = io.into();
        assert_eq!(err.code(), "E006");
        assert!(err.message().contains("receipt missing"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EduManageError = parse.into();
        assert_eq!(err.error_type(), "Serialization Error");
    }
}
