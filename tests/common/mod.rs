//! Shared test setup: config init, tempfile SQLite storage, and a minimal
//! HTTP stub for reachability probes.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Once};
use std::thread;

use tempfile::TempDir;

use quicklinkr::config::init_config;
use quicklinkr::storage::SeaOrmStorage;

static INIT: Once = Once::new();

pub fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// 建一个独立的 SQLite 存储；TempDir 必须由调用方持有到测试结束
pub async fn setup_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (temp_dir, Arc::new(storage))
}

/// 起一个固定返回指定状态码的 HTTP 桩服务器，返回 base URL
///
/// 接受任意多个连接；线程随测试进程退出。
pub fn spawn_http_stub(status: u16) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Failed to read stub addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);

            let reason = match status {
                200 => "OK",
                404 => "Not Found",
                500 => "Internal Server Error",
                _ => "Status",
            };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status, reason
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://127.0.0.1:{}", addr.port())
}

/// 一个必然连接失败的 URL（端口 1 无人监听）
pub fn refused_url() -> String {
    "http://127.0.0.1:1".to_string()
}
