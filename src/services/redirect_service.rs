//! Redirect resolution service
//!
//! Resolves a short code to its target URL, enforces expiration, and
//! records the visit. Click-log writes must never abort a redirect.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::{QuicklinkrError, Result};
use crate::storage::{ClickRecord, SeaOrmStorage};

/// Request context captured for the click log
#[derive(Debug, Clone, Default)]
pub struct VisitContext {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

pub struct RedirectService {
    storage: Arc<SeaOrmStorage>,
}

impl RedirectService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Resolve a short code for redirecting
    ///
    /// Returns the original URL on success. Side effects: one click-log
    /// row (best effort) and a counter increment. Expired entries neither
    /// log nor count.
    pub async fn resolve(&self, code: &str, visit: VisitContext) -> Result<String> {
        let entry = self.storage.get_by_short(code).await.ok_or_else(|| {
            debug!("Redirect: short code '{}' not found", code);
            QuicklinkrError::not_found(format!("Short code '{}' not found", code))
        })?;

        let now = Utc::now();
        if entry.is_expired(now) {
            debug!("Redirect: short code '{}' expired", code);
            return Err(QuicklinkrError::expired(format!(
                "Short code '{}' has expired",
                code
            )));
        }

        // 日志失败只告警，跳转照常
        let record = ClickRecord {
            url_id: entry.id,
            clicked_at: now,
            user_agent: visit.user_agent,
            ip_address: visit.ip_address,
        };
        if let Err(e) = self.storage.log_click(record).await {
            warn!("Redirect: click log write failed (continuing): {}", e);
        }

        self.storage.increment_clicks(entry.id).await?;

        Ok(entry.original)
    }
}
