use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum QuicklinkrError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    /// Unique-violation on the short column; the generator treats this as a
    /// collision and redraws.
    CodeCollision(String),
    InvalidUrl(String),
    Unreachable(String),
    NotFound(String),
    Expired(String),
    CodeTooShort(String),
    CodeTaken(String),
    UnsupportedMedia(String),
    InvalidMultipartData(String),
    QrEncoding(String),
}

impl QuicklinkrError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QuicklinkrError::DatabaseConfig(_) => "E001",
            QuicklinkrError::DatabaseConnection(_) => "E002",
            QuicklinkrError::DatabaseOperation(_) => "E003",
            QuicklinkrError::CodeCollision(_) => "E004",
            QuicklinkrError::InvalidUrl(_) => "E005",
            QuicklinkrError::Unreachable(_) => "E006",
            QuicklinkrError::NotFound(_) => "E007",
            QuicklinkrError::Expired(_) => "E008",
            QuicklinkrError::CodeTooShort(_) => "E009",
            QuicklinkrError::CodeTaken(_) => "E010",
            QuicklinkrError::UnsupportedMedia(_) => "E011",
            QuicklinkrError::InvalidMultipartData(_) => "E012",
            QuicklinkrError::QrEncoding(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QuicklinkrError::DatabaseConfig(_) => "Database Configuration Error",
            QuicklinkrError::DatabaseConnection(_) => "Database Connection Error",
            QuicklinkrError::DatabaseOperation(_) => "Database Operation Error",
            QuicklinkrError::CodeCollision(_) => "Short Code Collision",
            QuicklinkrError::InvalidUrl(_) => "Invalid URL",
            QuicklinkrError::Unreachable(_) => "URL Not Reachable",
            QuicklinkrError::NotFound(_) => "Resource Not Found",
            QuicklinkrError::Expired(_) => "Link Expired",
            QuicklinkrError::CodeTooShort(_) => "Custom Code Too Short",
            QuicklinkrError::CodeTaken(_) => "Custom Code Taken",
            QuicklinkrError::UnsupportedMedia(_) => "Unsupported Media Type",
            QuicklinkrError::InvalidMultipartData(_) => "Invalid Multipart Data",
            QuicklinkrError::QrEncoding(_) => "QR Encoding Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QuicklinkrError::DatabaseConfig(msg)
            | QuicklinkrError::DatabaseConnection(msg)
            | QuicklinkrError::DatabaseOperation(msg)
            | QuicklinkrError::CodeCollision(msg)
            | QuicklinkrError::InvalidUrl(msg)
            | QuicklinkrError::Unreachable(msg)
            | QuicklinkrError::NotFound(msg)
            | QuicklinkrError::Expired(msg)
            | QuicklinkrError::CodeTooShort(msg)
            | QuicklinkrError::CodeTaken(msg)
            | QuicklinkrError::UnsupportedMedia(msg)
            | QuicklinkrError::InvalidMultipartData(msg)
            | QuicklinkrError::QrEncoding(msg) => msg,
        }
    }

    /// HTTP 状态码映射（API 层使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            QuicklinkrError::InvalidUrl(_)
            | QuicklinkrError::Unreachable(_)
            | QuicklinkrError::CodeTooShort(_)
            | QuicklinkrError::CodeTaken(_)
            | QuicklinkrError::InvalidMultipartData(_) => StatusCode::BAD_REQUEST,
            QuicklinkrError::NotFound(_) => StatusCode::NOT_FOUND,
            QuicklinkrError::Expired(_) => StatusCode::GONE,
            QuicklinkrError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            QuicklinkrError::DatabaseConfig(_)
            | QuicklinkrError::DatabaseConnection(_)
            | QuicklinkrError::DatabaseOperation(_)
            | QuicklinkrError::CodeCollision(_)
            | QuicklinkrError::QrEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QuicklinkrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QuicklinkrError {}

// 便捷的构造函数
impl QuicklinkrError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::DatabaseOperation(msg.into())
    }

    pub fn code_collision<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::CodeCollision(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::InvalidUrl(msg.into())
    }

    pub fn unreachable<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::Unreachable(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::Expired(msg.into())
    }

    pub fn code_too_short<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::CodeTooShort(msg.into())
    }

    pub fn code_taken<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::CodeTaken(msg.into())
    }

    pub fn unsupported_media<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::UnsupportedMedia(msg.into())
    }

    pub fn invalid_multipart_data<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::InvalidMultipartData(msg.into())
    }

    pub fn qr_encoding<T: Into<String>>(msg: T) -> Self {
        QuicklinkrError::QrEncoding(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for QuicklinkrError {
    fn from(err: sea_orm::DbErr) -> Self {
        QuicklinkrError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuicklinkrError>;
