//! Analytics and history service
//!
//! Aggregate reporting over links and click logs. Reporting endpoints are
//! availability-over-correctness: any internal failure degrades to
//! zero/empty results instead of surfacing an error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::get_config;
use crate::errors::{QuicklinkrError, Result};
use crate::storage::{LinkEntry, SeaOrmStorage};

/// 热门链接展示时目标 URL 的截断长度
const TOP_URL_TRUNCATE_LEN: usize = 50;

/// 趋势序列的窗口天数
const TREND_WINDOW_DAYS: i64 = 7;

// ============ Aggregate DTOs ============

/// Top-N entry by click count
#[derive(Debug, Clone, Serialize)]
pub struct TopLink {
    pub short_code: String,
    pub clicks: i64,
    /// Destination URL, truncated for display
    pub original_url: String,
}

/// One day in the trailing click series
#[derive(Debug, Clone, Serialize)]
pub struct DailyClicks {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub clicks: u64,
}

/// Aggregate analytics payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyticsSummary {
    pub total_urls: u64,
    pub total_clicks: u64,
    pub clicks_today: u64,
    pub clicks_this_week: u64,
    pub top_urls: Vec<TopLink>,
    pub daily_clicks: Vec<DailyClicks>,
}

// ============ AnalyticsService Implementation ============

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Look up a single entry by short code (no expiration check; expired
    /// links stay viewable)
    pub async fn info(&self, code: &str) -> Result<LinkEntry> {
        self.storage
            .get_by_short(code)
            .await
            .ok_or_else(|| QuicklinkrError::not_found(format!("Short code '{}' not found", code)))
    }

    /// Most recently created entries, newest first
    pub async fn history(&self) -> Vec<LinkEntry> {
        let limit = get_config().features.history_limit;
        self.storage.recent(limit).await
    }

    /// Delete all links and click logs. Irreversible.
    pub async fn clear_history(&self) -> Result<()> {
        self.storage.clear_all().await?;
        info!("AnalyticsService: history cleared");
        Ok(())
    }

    /// Aggregate statistics
    ///
    /// 每个子查询失败时各自降级为 0/空，整体永远返回一个可用的汇总。
    pub async fn analytics(&self) -> AnalyticsSummary {
        let now = Utc::now();
        let today = now.date_naive();
        let day_start = today.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);

        let stats = self.storage.get_stats().await;

        let clicks_today = self
            .storage
            .count_clicks_between(day_start, day_end)
            .await
            .unwrap_or_else(|e| {
                warn!("Analytics: clicks_today query failed: {}", e);
                0
            });

        let week_start = now - Duration::days(TREND_WINDOW_DAYS);
        let clicks_this_week = self
            .storage
            .count_clicks_between(week_start, day_end)
            .await
            .unwrap_or_else(|e| {
                warn!("Analytics: clicks_this_week query failed: {}", e);
                0
            });

        let top_limit = get_config().features.top_links_limit;
        let top_urls = self
            .storage
            .top_by_clicks(top_limit)
            .await
            .into_iter()
            .map(|entry| TopLink {
                short_code: entry.short,
                clicks: entry.clicks,
                original_url: truncate_url(&entry.original),
            })
            .collect();

        let daily_clicks = self.daily_series(today, day_end).await;

        AnalyticsSummary {
            total_urls: stats.total_links,
            total_clicks: stats.total_clicks,
            clicks_today,
            clicks_this_week,
            top_urls,
            daily_clicks,
        }
    }

    /// 近 7 天逐日点击序列，从旧到新；没有点击的日期补 0
    async fn daily_series(
        &self,
        today: NaiveDate,
        day_end: chrono::DateTime<Utc>,
    ) -> Vec<DailyClicks> {
        let series_start = (today - Duration::days(TREND_WINDOW_DAYS - 1))
            .and_time(NaiveTime::MIN)
            .and_utc();

        let timestamps = self
            .storage
            .click_timestamps_between(series_start, day_end)
            .await
            .unwrap_or_else(|e| {
                warn!("Analytics: daily series query failed: {}", e);
                Vec::new()
            });

        let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
        for ts in timestamps {
            *per_day.entry(ts.date_naive()).or_insert(0) += 1;
        }

        (0..TREND_WINDOW_DAYS)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                DailyClicks {
                    date: date.format("%Y-%m-%d").to_string(),
                    clicks: per_day.get(&date).copied().unwrap_or(0),
                }
            })
            .collect()
    }
}

/// 目标 URL 超长时截断加省略号（按字符截断，避免切断多字节序列）
fn truncate_url(url: &str) -> String {
    if url.chars().count() > TOP_URL_TRUNCATE_LEN {
        let truncated: String = url.chars().take(TOP_URL_TRUNCATE_LEN).collect();
        format!("{}...", truncated)
    } else {
        url.to_string()
    }
}
