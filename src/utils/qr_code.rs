//! 短链接二维码生成
//!
//! 将短链接 URL 编码为 PNG 二维码，返回 base64 字符串供前端内联展示。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ExtendedColorType, ImageEncoder, Luma, codecs::png::PngEncoder};
use qrcode::QrCode;

use crate::errors::{QuicklinkrError, Result};

/// 二维码最小边长（像素）
const QR_MIN_DIMENSIONS: u32 = 200;

/// 生成 base64 编码的 PNG 二维码
pub fn generate_qr_base64(url: &str) -> Result<String> {
    let code = QrCode::new(url.as_bytes())
        .map_err(|e| QuicklinkrError::qr_encoding(format!("Failed to build QR matrix: {}", e)))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_DIMENSIONS, QR_MIN_DIMENSIONS)
        .build();

    let mut png_bytes: Vec<u8> = Vec::new();
    PngEncoder::new(&mut png_bytes)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::L8,
        )
        .map_err(|e| QuicklinkrError::qr_encoding(format!("Failed to encode PNG: {}", e)))?;

    Ok(STANDARD.encode(&png_bytes))
}
