//! Health 检查端点

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde_json::json;

use crate::storage::SeaOrmStorage;

/// GET /health - 存活与存储连通性检查
pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    Ok(match storage.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "backend": storage.backend_name(),
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(json!({
            "status": "unavailable",
            "error": e.to_string(),
        })),
    })
}
