//! API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::CreatedLink;
use crate::storage::LinkEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    pub custom_code: Option<String>,
    pub expires_in_days: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    /// Base64-encoded PNG
    pub qr_code: String,
}

impl From<CreatedLink> for ShortenResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            short_url: created.short_url,
            qr_code: created.qr_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlInfo {
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<LinkEntry> for UrlInfo {
    fn from(entry: LinkEntry) -> Self {
        Self {
            original_url: entry.original,
            short_code: entry.short,
            clicks: entry.clicks,
            created_at: Some(entry.created_at),
            expires_at: entry.expires_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkShortenRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkShortenResponse {
    pub results: Vec<ShortenResponse>,
}

/// 单个 CSV 导入成功项
#[derive(Debug, Clone, Serialize)]
pub struct BulkUploadItem {
    pub original: String,
    pub short_url: String,
    pub qr_code: String,
}

impl From<CreatedLink> for BulkUploadItem {
    fn from(created: CreatedLink) -> Self {
        Self {
            original: created.link.original,
            short_url: created.short_url,
            qr_code: created.qr_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkUploadResponse {
    pub message: String,
    pub results: Vec<BulkUploadItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 错误响应体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub error: &'static str,
    pub message: String,
}
