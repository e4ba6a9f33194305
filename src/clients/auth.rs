//! auth 服务客户端

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

use super::{Envelope, build_http_client};
use crate::config::ServicesConfig;
use crate::errors::{LMSystemError, Result};
use crate::models::users::entities::User;

#[derive(Debug, Deserialize)]
struct UserPayload {
    user: User,
}

#[derive(Clone)]
pub struct AuthServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl AuthServiceClient {
    pub fn new(services: &ServicesConfig) -> Self {
        Self {
            base_url: services.auth_url.trim_end_matches('/').to_string(),
            http: build_http_client(services.client_timeout),
        }
    }

    /// 校验 Bearer 令牌并取回调用者身份
    ///
    /// fail-closed：auth 服务不可达或超时返回 `UpstreamUnavailable`，
    /// 调用方（中间件）以 503 拒绝请求，绝不放行未经校验的令牌。
    pub async fn validate_bearer(&self, bearer: &str) -> Result<User> {
        let url = format!("{}/api/v1/auth/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| {
                LMSystemError::upstream_unavailable(format!("auth service unreachable: {e}"))
            })?;

        match response.status() {
            StatusCode::OK => {
                let envelope: Envelope<UserPayload> = response.json().await.map_err(|e| {
                    LMSystemError::upstream_unavailable(format!("auth service bad response: {e}"))
                })?;
                envelope
                    .data
                    .map(|payload| payload.user)
                    .ok_or_else(|| LMSystemError::authentication("Token validation failed"))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(LMSystemError::authentication("Invalid or expired token"))
            }
            status => Err(LMSystemError::upstream_unavailable(format!(
                "auth service returned {status}"
            ))),
        }
    }

    /// 回查用户是否存在
    ///
    /// fail-open：auth 服务出错时放行（返回 true），仅记录告警。
    /// 分配创建因此不会被 auth 服务抖动阻塞。
    pub async fn validate_user(&self, user_id: i64, bearer: &str) -> bool {
        let url = format!("{}/api/v1/users/{user_id}", self.base_url);
        match self.http.get(&url).bearer_auth(bearer).send().await {
            Ok(response) => match response.status() {
                StatusCode::OK => true,
                StatusCode::NOT_FOUND => false,
                status => {
                    warn!("User validation for {} returned {}", user_id, status);
                    true
                }
            },
            Err(e) => {
                warn!("User validation for {} failed: {}", user_id, e);
                true
            }
        }
    }
}
