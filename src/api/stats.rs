//! 查询端点：info、history、analytics

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::services::AnalyticsService;

use super::helpers::{api_result, success_response};
use super::types::{MessageResponse, UrlInfo};

/// GET /info/{code} - 查询单个链接（过期的也能查）
pub async fn get_info(
    path: web::Path<String>,
    analytics_service: web::Data<Arc<AnalyticsService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();

    Ok(api_result(
        analytics_service.info(&code).await.map(UrlInfo::from),
    ))
}

/// GET /api/history - 最近创建的链接，失败时返回空列表
pub async fn get_history(
    analytics_service: web::Data<Arc<AnalyticsService>>,
) -> ActixResult<impl Responder> {
    let entries: Vec<UrlInfo> = analytics_service
        .history()
        .await
        .into_iter()
        .map(UrlInfo::from)
        .collect();

    Ok(success_response(entries))
}

/// DELETE /api/history - 清空所有链接和点击日志
pub async fn delete_history(
    analytics_service: web::Data<Arc<AnalyticsService>>,
) -> ActixResult<impl Responder> {
    info!("API: clear history request");

    Ok(api_result(analytics_service.clear_history().await.map(
        |()| MessageResponse {
            message: "History cleared successfully".to_string(),
        },
    )))
}

/// GET /api/analytics - 聚合统计，内部失败时降级为全零
pub async fn get_analytics(
    analytics_service: web::Data<Arc<AnalyticsService>>,
) -> ActixResult<impl Responder> {
    Ok(success_response(analytics_service.analytics().await))
}
