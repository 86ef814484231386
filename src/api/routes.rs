//! 路由注册
//!
//! 固定路径的端点必须先于 /{code} 通配路由注册。

use actix_web::web;

use super::health::health_check;
use super::links::{post_bulk_shorten, post_bulk_upload, post_shorten};
use super::redirect::{handle_redirect, root_redirect};
use super::stats::{delete_history, get_analytics, get_history, get_info};

/// 注册全部路由
///
/// 与测试共用：`App::new().configure(api::register)`，调用方负责先注入
/// 各服务的 `web::Data`。
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(post_shorten))
        .route("/bulk-shorten", web::post().to(post_bulk_shorten))
        .route("/bulk-upload", web::post().to(post_bulk_upload))
        .service(
            web::scope("/api")
                .route("/history", web::get().to(get_history))
                .route("/history", web::delete().to(delete_history))
                .route("/analytics", web::get().to(get_analytics)),
        )
        .route("/info/{code}", web::get().to(get_info))
        .route("/health", web::get().to(health_check))
        .route("/", web::get().to(root_redirect))
        // 通配路由必须最后注册
        .route("/{code}", web::get().to(handle_redirect));
}
