//! API 帮助函数

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use crate::errors::QuicklinkrError;
use crate::services::VisitContext;

use super::types::ErrorBody;

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok()
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

/// 从 QuicklinkrError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_service(err: &QuicklinkrError) -> HttpResponse {
    HttpResponse::build(err.http_status())
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            code: err.code(),
            error: err.error_type(),
            message: err.message().to_string(),
        })
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: crate::errors::Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_service(&e),
    }
}

/// 从请求上下文提取点击日志需要的元信息
pub fn visit_context_from(req: &HttpRequest) -> VisitContext {
    let user_agent = req
        .headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let ip_address = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    VisitContext {
        user_agent,
        ip_address,
    }
}
