//! 网关用的下游健康探针

use tracing::warn;

use super::build_http_client;
use crate::config::ServicesConfig;

// 健康探测不沿用普通调用超时，探针要快进快出
const PROBE_TIMEOUT_SECS: u64 = 2;

#[derive(Clone)]
pub struct HealthClient {
    targets: Vec<(String, String)>,
    http: reqwest::Client,
}

impl HealthClient {
    pub fn new(services: &ServicesConfig) -> Self {
        let targets = vec![
            ("auth".to_string(), services.auth_url.clone()),
            ("content".to_string(), services.content_url.clone()),
            ("assignment".to_string(), services.assignment_url.clone()),
        ];
        Self {
            targets,
            http: build_http_client(PROBE_TIMEOUT_SECS),
        }
    }

    /// 逐个探测下游 /health，返回 (服务名, 是否健康)
    pub async fn probe_all(&self) -> Vec<(String, bool)> {
        let mut results = Vec::with_capacity(self.targets.len());
        for (name, base_url) in &self.targets {
            let url = format!("{}/health", base_url.trim_end_matches('/'));
            let healthy = match self.http.get(&url).send().await {
                Ok(response) => response.status().is_success(),
                Err(e) => {
                    warn!("Health probe for {} failed: {}", name, e);
                    false
                }
            };
            results.push((name.clone(), healthy));
        }
        results
    }
}
