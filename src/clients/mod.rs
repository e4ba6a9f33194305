//! 服务间 HTTP 客户端
//!
//! 基于 reqwest，超时取配置 `services.client_timeout`，不做重试。
//! 失败策略由各调用点决定：令牌校验 fail-closed，存在性回查与
//! 进度富化 fail-open，详见各方法文档。

pub mod assignments;
pub mod auth;
pub mod content;
pub mod health;

pub use assignments::AssignmentServiceClient;
pub use auth::AuthServiceClient;
pub use content::ContentServiceClient;
pub use health::HealthClient;

use serde::Deserialize;
use std::time::Duration;

/// 下游服务统一响应包的客户端视图
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[allow(dead_code)]
    pub code: i32,
    #[allow(dead_code)]
    pub message: String,
    pub data: Option<T>,
}

pub(crate) fn build_http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}
