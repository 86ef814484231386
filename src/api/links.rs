//! 链接创建端点：单个、批量列表、CSV 上传

use std::io::Cursor;
use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{Responder, Result as ActixResult, web};
use csv::ReaderBuilder;
use futures_util::StreamExt;
use tracing::{info, warn};

use crate::errors::QuicklinkrError;
use crate::services::{CreateLinkRequest, LinkService};

use super::helpers::{error_from_service, success_response};
use super::types::{
    BulkShortenRequest, BulkShortenResponse, BulkUploadItem, BulkUploadResponse, ShortenRequest,
    ShortenResponse,
};

/// 最大上传文件大小 (10MB)
const MAX_UPLOAD_FILE_SIZE: usize = 10 * 1024 * 1024;

/// POST /shorten - 创建单个短链接
pub async fn post_shorten(
    payload: web::Json<ShortenRequest>,
    link_service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let req = payload.into_inner();
    info!("API: shorten request for '{}'", req.url);

    let result = link_service
        .create_link(CreateLinkRequest {
            url: req.url,
            custom_code: req.custom_code,
            expires_in_days: req.expires_in_days,
        })
        .await;

    Ok(match result {
        Ok(created) => success_response(ShortenResponse::from(created)),
        Err(e) => error_from_service(&e),
    })
}

/// POST /bulk-shorten - 批量创建，失败的候选跳过不报错
pub async fn post_bulk_shorten(
    payload: web::Json<BulkShortenRequest>,
    link_service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let urls = payload.into_inner().urls;
    info!("API: bulk shorten request with {} candidates", urls.len());

    let results: Vec<ShortenResponse> = link_service
        .create_bulk(urls)
        .await
        .into_iter()
        .map(ShortenResponse::from)
        .collect();

    Ok(success_response(BulkShortenResponse { results }))
}

/// POST /bulk-upload - 上传 CSV，一行一个 URL
pub async fn post_bulk_upload(
    mut payload: Multipart,
    link_service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    info!("API: bulk upload request");

    let mut csv_data: Option<Vec<u8>> = None;
    let mut filename = String::new();

    // 解析 multipart form data
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                warn!("API: failed to parse multipart field: {}", e);
                return Ok(error_from_service(
                    &QuicklinkrError::invalid_multipart_data(format!(
                        "Invalid multipart data: {}",
                        e
                    )),
                ));
            }
        };

        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            // 忽略未知字段
            continue;
        }

        filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("")
            .to_string();

        // 读取文件内容（带大小限制）
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if data.len() + bytes.len() > MAX_UPLOAD_FILE_SIZE {
                        return Ok(error_from_service(
                            &QuicklinkrError::invalid_multipart_data(format!(
                                "File size exceeds maximum {} MB",
                                MAX_UPLOAD_FILE_SIZE / 1024 / 1024
                            )),
                        ));
                    }
                    data.extend_from_slice(&bytes);
                }
                Err(e) => {
                    warn!("API: failed to read file chunk: {}", e);
                    return Ok(error_from_service(
                        &QuicklinkrError::invalid_multipart_data(format!(
                            "Failed to read file: {}",
                            e
                        )),
                    ));
                }
            }
        }
        csv_data = Some(data);
    }

    // 只接受 .csv 文件
    if !filename.to_lowercase().ends_with(".csv") {
        return Ok(error_from_service(&QuicklinkrError::unsupported_media(
            "Only CSV files allowed",
        )));
    }

    let csv_data = match csv_data {
        Some(data) if !data.is_empty() => data,
        _ => {
            return Ok(error_from_service(
                &QuicklinkrError::invalid_multipart_data("No CSV file provided"),
            ));
        }
    };

    let urls = parse_upload_urls(&csv_data);
    info!(
        "API: bulk upload '{}' parsed {} candidate URLs",
        filename,
        urls.len()
    );

    let results: Vec<BulkUploadItem> = link_service
        .create_bulk(urls)
        .await
        .into_iter()
        .map(BulkUploadItem::from)
        .collect();

    Ok(success_response(BulkUploadResponse {
        message: format!("Processed {} URLs", results.len()),
        results,
    }))
}

/// 解析上传内容：一行一个 URL，不以 http 开头的行跳过
fn parse_upload_urls(data: &[u8]) -> Vec<String> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let mut urls = Vec::new();
    for result in csv_reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("API: skipping unparseable CSV row: {}", e);
                continue;
            }
        };

        let Some(raw) = record.get(0) else { continue };
        let candidate = raw.trim();
        if !candidate.is_empty() && candidate.starts_with("http") {
            urls.push(candidate.to_string());
        }
    }

    urls
}
