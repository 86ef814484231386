//! 短码跳转与根路径跳转

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, Result as ActixResult, web};
use tracing::instrument;

use crate::config::get_config;
use crate::services::RedirectService;

use super::helpers::{error_from_service, visit_context_from};

/// GET /{code} - 302 跳转到原始 URL
///
/// 404 未知短码，410 已过期。副作用：写点击日志、点击数 +1。
#[instrument(skip(req, redirect_service), fields(code = %path))]
pub async fn handle_redirect(
    req: HttpRequest,
    path: web::Path<String>,
    redirect_service: web::Data<Arc<RedirectService>>,
) -> ActixResult<impl Responder> {
    let code = path.into_inner();
    let visit = visit_context_from(&req);

    Ok(match redirect_service.resolve(&code, visit).await {
        Ok(target) => HttpResponse::Found()
            .insert_header(("Location", target))
            .finish(),
        Err(e) => error_from_service(&e),
    })
}

/// GET / - 跳转到静态前端入口
pub async fn root_redirect() -> ActixResult<impl Responder> {
    let frontend_url = get_config().features.frontend_url.clone();

    Ok(HttpResponse::Found()
        .insert_header(("Location", frontend_url))
        .finish())
}
