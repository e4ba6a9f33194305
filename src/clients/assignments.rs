//! assignment 服务客户端

use reqwest::StatusCode;
use serde::Deserialize;

use super::{Envelope, build_http_client};
use crate::config::ServicesConfig;
use crate::errors::{LMSystemError, Result};

#[derive(Debug, Deserialize)]
struct AssignmentItem {
    content_id: String,
}

#[derive(Debug, Deserialize)]
struct AssignmentListPayload {
    items: Vec<AssignmentItem>,
}

#[derive(Clone)]
pub struct AssignmentServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl AssignmentServiceClient {
    pub fn new(services: &ServicesConfig) -> Self {
        Self {
            base_url: services.assignment_url.trim_end_matches('/').to_string(),
            http: build_http_client(services.client_timeout),
        }
    }

    /// 学生被分配的内容 ID 列表，按内容类型过滤
    ///
    /// 调用点 fail-open：出错时 content 服务把学生可见范围退化为
    /// 仅已发布内容，错误通过 `Err` 交由调用方降级。
    pub async fn assigned_content_ids(
        &self,
        student_id: i64,
        content_type: &str,
        bearer: &str,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/api/v1/assignments?student_id={student_id}&content_type={content_type}&size=1000",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| {
                LMSystemError::upstream_unavailable(format!("assignment service unreachable: {e}"))
            })?;

        match response.status() {
            StatusCode::OK => {
                let envelope: Envelope<AssignmentListPayload> =
                    response.json().await.map_err(|e| {
                        LMSystemError::upstream_unavailable(format!(
                            "assignment service bad response: {e}"
                        ))
                    })?;
                Ok(envelope
                    .data
                    .map(|payload| payload.items.into_iter().map(|i| i.content_id).collect())
                    .unwrap_or_default())
            }
            status => Err(LMSystemError::upstream_unavailable(format!(
                "assignment service returned {status}"
            ))),
        }
    }
}
