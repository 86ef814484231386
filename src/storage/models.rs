use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 短链接条目（领域模型）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    pub id: i64,
    pub original: String,
    pub short: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkEntry {
    /// 过期判断：expires_at 在 now 之前即视为过期（条目不删除）
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }
}

/// 待插入的短链接（id 由数据库生成）
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// 一次访问的点击记录
#[derive(Debug, Clone)]
pub struct ClickRecord {
    pub url_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// 链接总量统计
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkStats {
    pub total_links: u64,
    pub total_clicks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry_with_expiry(expires_at: Option<DateTime<Utc>>) -> LinkEntry {
        LinkEntry {
            id: 1,
            original: "https://example.com".to_string(),
            short: "abc123".to_string(),
            clicks: 0,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_no_expiry_never_expires() {
        let entry = entry_with_expiry(None);
        assert!(!entry.is_expired(Utc::now()));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = Utc::now();
        let entry = entry_with_expiry(Some(now - Duration::hours(1)));
        assert!(entry.is_expired(now));
    }

    #[test]
    fn test_future_expiry_is_live() {
        let now = Utc::now();
        let entry = entry_with_expiry(Some(now + Duration::days(7)));
        assert!(!entry.is_expired(now));
    }
}
