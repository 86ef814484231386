//! URL 验证模块
//!
//! 规范化提交的 URL 并做结构校验，阻止危险协议

use url::Url;

/// URL 验证错误
#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    DangerousProtocol(String),
    InvalidHost(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::DangerousProtocol(proto) => {
                write!(f, "Dangerous protocol blocked: {}", proto)
            }
            Self::InvalidHost(host) => write!(
                f,
                "Invalid host '{}'. Expected a domain, localhost, or an IPv4 address",
                host
            ),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 危险协议列表
const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// 规范化并验证 URL
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 不是危险协议（javascript:, data:, file: 等）
/// 3. 无协议时补 https:// 前缀
/// 4. 主机必须是域名、localhost 或点分 IPv4，可带端口和路径
///
/// 成功时返回规范化后的 URL 字符串（即持久化的 `original`）。
pub fn normalize_and_validate(url: &str) -> Result<String, UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();

    // 检查危险协议
    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    // 无协议时补 https:// 前缀
    let normalized = if url_lower.starts_with("http://") || url_lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    // 解析 URL 验证格式
    let parsed =
        Url::parse(&normalized).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(UrlValidationError::InvalidFormat(format!(
            "Unexpected scheme: {}",
            parsed.scheme()
        )));
    }

    match parsed.host() {
        Some(url::Host::Domain(domain)) if is_acceptable_domain(domain) => {}
        Some(url::Host::Ipv4(_)) => {}
        Some(other) => {
            return Err(UrlValidationError::InvalidHost(other.to_string()));
        }
        None => {
            return Err(UrlValidationError::InvalidHost(String::new()));
        }
    }

    Ok(normalized)
}

/// 域名形状检查：localhost，或至少带一个点的合法标签序列
fn is_acceptable_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    if !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}
