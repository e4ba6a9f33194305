//! content 服务客户端

use reqwest::StatusCode;
use tracing::warn;

use super::{Envelope, build_http_client};
use crate::config::ServicesConfig;
use crate::errors::{LMSystemError, Result};
use crate::models::content::entities::Course;

#[derive(Clone)]
pub struct ContentServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl ContentServiceClient {
    pub fn new(services: &ServicesConfig) -> Self {
        Self {
            base_url: services.content_url.trim_end_matches('/').to_string(),
            http: build_http_client(services.client_timeout),
        }
    }

    /// 按 ID 取回课程
    ///
    /// fail-closed：404 返回 `Ok(None)`，网络错误或超时返回
    /// `UpstreamUnavailable`。分配创建依赖这一区分，课程缺失与
    /// content 服务不可达分别映射为 404 与 503。
    pub async fn get_course(&self, course_id: &str, bearer: &str) -> Result<Option<Course>> {
        let url = format!("{}/api/v1/courses/{course_id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| {
                LMSystemError::upstream_unavailable(format!("content service unreachable: {e}"))
            })?;

        match response.status() {
            StatusCode::OK => {
                let envelope: Envelope<Course> = response.json().await.map_err(|e| {
                    LMSystemError::upstream_unavailable(format!(
                        "content service bad response: {e}"
                    ))
                })?;
                Ok(envelope.data)
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(LMSystemError::upstream_unavailable(format!(
                "content service returned {status}"
            ))),
        }
    }

    /// 课程的活跃课时数，用于分配详情的进度富化
    ///
    /// fail-open：任何错误都返回 `None`，调用方跳过富化。
    pub async fn course_lesson_total(&self, course_id: &str, bearer: &str) -> Option<i32> {
        match self.get_course(course_id, bearer).await {
            Ok(course) => course.map(|c| c.total_lessons),
            Err(e) => {
                warn!("Course progress enrichment skipped for {}: {}", course_id, e);
                None
            }
        }
    }
}
