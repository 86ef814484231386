//! 可达性探测
//!
//! 对目标 URL 发起出站 HEAD 探测（跟随重定向，带超时），传输层失败时
//! 回退到 GET。结果建模为类型化的 [`ProbeOutcome`]，而不是吞掉所有
//! 异常的布尔值，便于测试区分失败原因。

use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, warn};
use ureq::Agent;

/// 探测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 某次探测返回了 < 400 的状态码
    Reachable(u16),
    /// 目标有响应但状态码 >= 400
    Unreachable(u16),
    /// 传输层失败（DNS、连接、超时等）
    ProbeError(String),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable(_))
    }
}

/// 全局 HTTP Agent（ureq 的 Agent 是 Send + Sync）
static HTTP_AGENT: OnceLock<Agent> = OnceLock::new();

fn get_agent(timeout_secs: u64) -> &'static Agent {
    HTTP_AGENT.get_or_init(|| {
        Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into()
    })
}

/// 同步探测（在 spawn_blocking 中调用）
fn probe_sync(url: String, timeout_secs: u64) -> ProbeOutcome {
    let agent = get_agent(timeout_secs);

    // HEAD 优先；目标响应了就以状态码为准
    match agent.head(&url).call() {
        Ok(resp) => {
            let status = resp.status().as_u16();
            return classify(status);
        }
        Err(e) => {
            debug!("HEAD probe to \"{}\" failed: {}, falling back to GET", url, e);
        }
    }

    // 传输层失败时回退 GET（部分服务器不接受 HEAD）
    match agent.get(&url).call() {
        Ok(resp) => classify(resp.status().as_u16()),
        Err(e) => {
            warn!("GET probe to \"{}\" failed: {}", url, e);
            ProbeOutcome::ProbeError(e.to_string())
        }
    }
}

fn classify(status: u16) -> ProbeOutcome {
    if status < 400 {
        ProbeOutcome::Reachable(status)
    } else {
        ProbeOutcome::Unreachable(status)
    }
}

/// 异步探测目标 URL 是否可达
///
/// 使用 spawn_blocking 在线程池中执行同步 HTTP 请求，
/// 超时上限由调用方传入（配置项 probe.timeout_secs）。
pub async fn probe_reachability(url: &str, timeout_secs: u64) -> ProbeOutcome {
    let url = url.to_string();

    tokio::task::spawn_blocking(move || probe_sync(url, timeout_secs))
        .await
        .unwrap_or_else(|e| {
            warn!("Reachability spawn_blocking failed: {}", e);
            ProbeOutcome::ProbeError(e.to_string())
        })
}
