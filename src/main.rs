use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::info;

use quicklinkr::api;
use quicklinkr::config::{get_config, init_config};
use quicklinkr::logging::init_logging;
use quicklinkr::services::{AnalyticsService, LinkService, RedirectService};
use quicklinkr::storage::StorageFactory;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_config();
    let config = get_config();

    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let _logging_guard = init_logging(&config);

    // 检查存储后端（连接 + 迁移）
    let storage = StorageFactory::create()
        .await
        .expect("Failed to create storage");
    info!("Using storage backend: {}", storage.backend_name());

    let link_service = web::Data::new(Arc::new(LinkService::new(storage.clone())));
    let redirect_service = web::Data::new(Arc::new(RedirectService::new(storage.clone())));
    let analytics_service = web::Data::new(Arc::new(AnalyticsService::new(storage.clone())));
    let storage_data = web::Data::new(storage);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        // 前端可能部署在其他源上
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(link_service.clone())
            .app_data(redirect_service.clone())
            .app_data(analytics_service.clone())
            .app_data(storage_data.clone())
            .configure(api::register)
    })
    .bind(bind_address)?
    .run()
    .await
}
