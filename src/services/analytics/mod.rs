pub mod learning;
pub mod student_sessions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::LearningAnalyticsParams;
use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnalyticsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学习分析聚合（从源数据行重算，不读计数缓存）
    pub async fn learning_analytics(
        &self,
        query: LearningAnalyticsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        learning::learning_analytics(self, query, request).await
    }

    // 学生会话统计
    pub async fn student_session_stats(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student_sessions::student_session_stats(self, student_id, request).await
    }
}
