//! End-to-end API tests over the full route table

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::json;

use quicklinkr::api;
use quicklinkr::services::{AnalyticsService, LinkService, RedirectService};

use common::{refused_url, setup_storage, spawn_http_stub};

macro_rules! build_app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(LinkService::new($storage.clone()))))
                .app_data(web::Data::new(Arc::new(RedirectService::new(
                    $storage.clone(),
                ))))
                .app_data(web::Data::new(Arc::new(AnalyticsService::new(
                    $storage.clone(),
                ))))
                .app_data(web::Data::new($storage.clone()))
                .configure(api::register),
        )
        .await
    };
}

const BOUNDARY: &str = "----quicklinkr-test-boundary";

fn multipart_csv(filename: &str, content: &str) -> (String, Vec<u8>) {
    let content_type = format!("multipart/form-data; boundary={}", BOUNDARY);
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
        b = BOUNDARY,
        f = filename,
        c = content,
    );
    (content_type, body.into_bytes())
}

#[actix_web::test]
async fn test_shorten_roundtrip() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);

    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let short_url = body["short_url"].as_str().unwrap();
    assert!(!body["qr_code"].as_str().unwrap().is_empty());

    // 跟着短链接跳回原始 URL
    let code = short_url.rsplit('/').next().unwrap();
    let resp = TestRequest::get()
        .uri(&format!("/{}", code))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        base
    );
}

#[actix_web::test]
async fn test_shorten_rejects_unreachable() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);

    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": refused_url() }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "URL is not reachable or invalid");
}

#[actix_web::test]
async fn test_shorten_custom_code_conflicts() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);

    // 太短
    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base, "custom_code": "ab" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 占用
    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base, "custom_code": "mine" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base, "custom_code": "mine" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_shorten_with_zero_day_expiry_is_gone() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);

    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base, "custom_code": "flash", "expires_in_days": 0 }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = TestRequest::get().uri("/flash").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::GONE);

    // 未计数
    assert_eq!(storage.get_by_short("flash").await.unwrap().clicks, 0);
}

#[actix_web::test]
async fn test_bulk_shorten_returns_only_successes() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);

    let resp = TestRequest::post()
        .uri("/bulk-shorten")
        .set_json(json!({ "urls": [format!("{}/a", base), refused_url(), format!("{}/b", base)] }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_bulk_upload_csv() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);
    let dead = spawn_http_stub(500);

    // 5 行：3 可达、2 不可达
    let csv = format!(
        "{0}/one\n{0}/two\n{1}/down\n{0}/three\n{2}\n",
        base,
        dead,
        refused_url()
    );
    let (content_type, body) = multipart_csv("links.csv", &csv);

    let resp = TestRequest::post()
        .uri("/bulk-upload")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Processed 3 URLs");
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for item in results {
        assert!(item["original"].as_str().unwrap().starts_with(&base));
        assert!(!item["qr_code"].as_str().unwrap().is_empty());
    }

    // 只有成功的 3 条落库
    assert_eq!(storage.get_stats().await.total_links, 3);
}

#[actix_web::test]
async fn test_bulk_upload_rejects_non_csv() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);

    let (content_type, body) = multipart_csv("links.txt", "https://example.com\n");

    let resp = TestRequest::post()
        .uri("/bulk-upload")
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[actix_web::test]
async fn test_history_and_analytics_endpoints() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);
    let base = spawn_http_stub(200);

    let resp = TestRequest::post()
        .uri("/shorten")
        .set_json(json!({ "url": base, "custom_code": "tracked" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = TestRequest::get().uri("/tracked").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let resp = TestRequest::get().uri("/api/history").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let history: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["short_code"], "tracked");
    assert_eq!(history[0]["clicks"], 1);

    let resp = TestRequest::get()
        .uri("/api/analytics")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let analytics: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(analytics["total_urls"], 1);
    assert_eq!(analytics["total_clicks"], 1);

    // 清空后一切归零
    let resp = TestRequest::delete()
        .uri("/api/history")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = TestRequest::get().uri("/api/history").send_request(&app).await;
    let history: serde_json::Value = test::read_body_json(resp).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (_dir, storage) = setup_storage().await;
    let app = build_app!(storage);

    let resp = TestRequest::get().uri("/health").send_request(&app).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "sqlite");
}
