//! Analytics and history service tests

mod common;

use chrono::{Duration, Utc};

use quicklinkr::services::{AnalyticsService, RedirectService, VisitContext};
use quicklinkr::storage::NewLink;

use common::setup_storage;

fn new_link(short: &str, original: &str) -> NewLink {
    NewLink {
        original: original.to_string(),
        short: short.to_string(),
        created_at: Utc::now(),
        expires_at: None,
    }
}

#[tokio::test]
async fn test_history_is_newest_first_and_capped() {
    let (_dir, storage) = setup_storage().await;
    let service = AnalyticsService::new(storage.clone());

    for i in 0..12 {
        storage
            .insert_link(new_link(
                &format!("code{:02}", i),
                "https://example.com/page",
            ))
            .await
            .unwrap();
    }

    let history = service.history().await;
    assert_eq!(history.len(), 10);
    // 最新创建的排最前
    assert_eq!(history[0].short, "code11");
    assert_eq!(history[9].short, "code02");
}

#[tokio::test]
async fn test_clear_history_empties_everything() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage.clone());
    let redirect = RedirectService::new(storage.clone());

    storage
        .insert_link(new_link("wipeme", "https://example.com"))
        .await
        .unwrap();
    redirect
        .resolve("wipeme", VisitContext::default())
        .await
        .unwrap();

    analytics.clear_history().await.unwrap();

    assert!(analytics.history().await.is_empty());
    let summary = analytics.analytics().await;
    assert_eq!(summary.total_urls, 0);
    assert_eq!(summary.total_clicks, 0);
    assert_eq!(summary.clicks_today, 0);
    assert!(summary.top_urls.is_empty());
}

#[tokio::test]
async fn test_analytics_aggregates() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage.clone());
    let redirect = RedirectService::new(storage.clone());

    storage
        .insert_link(new_link("first", "https://example.com/first"))
        .await
        .unwrap();
    storage
        .insert_link(new_link("second", "https://example.com/second"))
        .await
        .unwrap();

    // first 点两次，second 一次
    for _ in 0..2 {
        redirect
            .resolve("first", VisitContext::default())
            .await
            .unwrap();
    }
    redirect
        .resolve("second", VisitContext::default())
        .await
        .unwrap();

    let summary = analytics.analytics().await;

    assert_eq!(summary.total_urls, 2);
    assert_eq!(summary.total_clicks, 3);
    assert_eq!(summary.clicks_today, 3);
    assert_eq!(summary.clicks_this_week, 3);

    // 热门排序按点击数倒序
    assert_eq!(summary.top_urls[0].short_code, "first");
    assert_eq!(summary.top_urls[0].clicks, 2);
    assert_eq!(summary.top_urls[1].short_code, "second");

    // 7 天序列从旧到新，今天的计数在最后一格
    assert_eq!(summary.daily_clicks.len(), 7);
    assert_eq!(summary.daily_clicks[6].clicks, 3);
    assert!(summary.daily_clicks[..6].iter().all(|d| d.clicks == 0));
}

#[tokio::test]
async fn test_analytics_truncates_long_urls() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage.clone());

    let long_url = format!("https://example.com/{}", "x".repeat(80));
    storage
        .insert_link(new_link("longurl", &long_url))
        .await
        .unwrap();

    let summary = analytics.analytics().await;
    let top = &summary.top_urls[0];
    assert!(top.original_url.ends_with("..."));
    assert_eq!(top.original_url.chars().count(), 53);
}

#[tokio::test]
async fn test_analytics_on_empty_database() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage);

    let summary = analytics.analytics().await;
    assert_eq!(summary.total_urls, 0);
    assert_eq!(summary.total_clicks, 0);
    assert!(summary.top_urls.is_empty());
    assert_eq!(summary.daily_clicks.len(), 7);
}

#[tokio::test]
async fn test_info_lookup() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage.clone());

    storage
        .insert_link(new_link("known", "https://example.com"))
        .await
        .unwrap();

    let entry = analytics.info("known").await.unwrap();
    assert_eq!(entry.original, "https://example.com");
    assert_eq!(entry.clicks, 0);

    assert!(analytics.info("unknown").await.is_err());
}

#[tokio::test]
async fn test_expired_links_do_not_resolve_but_stay_counted() {
    let (_dir, storage) = setup_storage().await;
    let analytics = AnalyticsService::new(storage.clone());
    let redirect = RedirectService::new(storage.clone());

    let mut link = new_link("fading", "https://example.com");
    link.expires_at = Some(Utc::now() - Duration::minutes(5));
    storage.insert_link(link).await.unwrap();

    assert!(redirect
        .resolve("fading", VisitContext::default())
        .await
        .is_err());

    // 过期条目不删除，统计里仍计为一条链接
    let summary = analytics.analytics().await;
    assert_eq!(summary.total_urls, 1);
    assert_eq!(summary.total_clicks, 0);
}
