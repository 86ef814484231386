//! Link creation service
//!
//! Provides unified business logic for shortening URLs, shared between the
//! single-link endpoint and both bulk ingestion endpoints.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::config::get_config;
use crate::errors::{QuicklinkrError, Result};
use crate::storage::{LinkEntry, NewLink, SeaOrmStorage};
use crate::utils::generate_random_code;
use crate::utils::qr_code::generate_qr_base64;
use crate::utils::reachability::probe_reachability;
use crate::utils::url_validator::normalize_and_validate;

/// 随机码生成的最大尝试次数（62^6 空间下碰撞极少，但循环必须有界）
const MAX_CODE_ATTEMPTS: usize = 16;

/// 自定义短码的最小长度
const MIN_CUSTOM_CODE_LEN: usize = 3;

// ============ Request/Response DTOs ============

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Target URL (scheme optional, https:// is assumed)
    pub url: String,
    /// Custom short code (optional, random code generated if not provided)
    pub custom_code: Option<String>,
    /// Expiration period in days from now
    pub expires_in_days: Option<i64>,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct CreatedLink {
    /// The persisted entry
    pub link: LinkEntry,
    /// Fully-qualified short URL
    pub short_url: String,
    /// Base64-encoded PNG QR code for the short URL
    pub qr_code: String,
    /// Whether the code was auto-generated
    pub generated_code: bool,
}

// ============ LinkService Implementation ============

/// Service for link creation
///
/// Encapsulates the validate → probe → generate-code → persist → QR-encode
/// pipeline so HTTP handlers stay thin.
pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Create a single short link
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<CreatedLink> {
        let config = get_config();

        // 结构校验 + 规范化
        let original = normalize_and_validate(&req.url)
            .map_err(|e| QuicklinkrError::invalid_url(e.to_string()))?;

        // 可达性探测（带超时上限）
        let outcome = probe_reachability(&original, config.probe.timeout_secs).await;
        if !outcome.is_reachable() {
            debug!("Reachability probe for '{}' failed: {:?}", original, outcome);
            return Err(QuicklinkrError::unreachable(
                "URL is not reachable or invalid",
            ));
        }

        // 过期时间：now + N 天；0 天即刻过期
        let expires_at = req
            .expires_in_days
            .map(|days| Utc::now() + Duration::days(days));

        let (entry, generated) = match req.custom_code.filter(|c| !c.is_empty()) {
            Some(code) => (self.insert_custom(code, original, expires_at).await?, false),
            None => (self.insert_generated(original, expires_at).await?, true),
        };

        let short_url = config.short_url_for(&entry.short);
        let qr_code = generate_qr_base64(&short_url)?;

        info!(
            "LinkService: created '{}' -> '{}' (generated: {})",
            entry.short, entry.original, generated
        );

        Ok(CreatedLink {
            link: entry,
            short_url,
            qr_code,
            generated_code: generated,
        })
    }

    /// Create many links from a list of URLs
    ///
    /// Candidates that fail validation, reachability or persistence are
    /// skipped, never abort the batch. The response only carries
    /// successes; each skip is logged with its reason.
    pub async fn create_bulk(&self, urls: Vec<String>) -> Vec<CreatedLink> {
        let mut results = Vec::new();

        for url in urls {
            let req = CreateLinkRequest {
                url: url.clone(),
                custom_code: None,
                expires_in_days: None,
            };

            match self.create_link(req).await {
                Ok(created) => results.push(created),
                Err(e) => {
                    warn!("LinkService: bulk candidate '{}' skipped: {}", url, e);
                }
            }
        }

        info!("LinkService: bulk created {} links", results.len());
        results
    }

    /// 用户自定义短码：长度 >= 3 且未被占用，原样使用不再随机化
    async fn insert_custom(
        &self,
        code: String,
        original: String,
        expires_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<LinkEntry> {
        if code.chars().count() < MIN_CUSTOM_CODE_LEN {
            return Err(QuicklinkrError::code_too_short(
                "Custom code must be at least 3 characters",
            ));
        }

        if self.storage.short_exists(&code).await? {
            return Err(QuicklinkrError::code_taken("Custom code already exists"));
        }

        let new_link = NewLink {
            original,
            short: code,
            created_at: Utc::now(),
            expires_at,
        };

        // check-then-insert 的窗口期里输给并发写入也算占用
        self.storage.insert_link(new_link).await.map_err(|e| match e {
            QuicklinkrError::CodeCollision(_) => {
                QuicklinkrError::code_taken("Custom code already exists")
            }
            other => other,
        })
    }

    /// 随机短码：占用或插入冲突时重抽，次数有界
    async fn insert_generated(
        &self,
        original: String,
        expires_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<LinkEntry> {
        let length = get_config().features.random_code_length;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_random_code(length);

            if self.storage.short_exists(&code).await? {
                debug!("Code '{}' taken, redrawing (attempt {})", code, attempt);
                continue;
            }

            let new_link = NewLink {
                original: original.clone(),
                short: code,
                created_at: Utc::now(),
                expires_at,
            };

            match self.storage.insert_link(new_link).await {
                Ok(entry) => return Ok(entry),
                Err(QuicklinkrError::CodeCollision(_)) => {
                    debug!("Lost insert race, redrawing (attempt {})", attempt);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(QuicklinkrError::database_operation(format!(
            "Failed to allocate a unique short code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }
}
