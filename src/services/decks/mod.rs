pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::clients::AssignmentServiceClient;
use crate::models::content::requests::{ContentListParams, CreateDeckRequest, UpdateDeckRequest};
use crate::storage::Storage;

pub struct DeckService {
    storage: Option<Arc<dyn Storage>>,
}

impl DeckService {
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

    pub(crate) fn get_assignment_client(
        &self,
        request: &HttpRequest,
    ) -> Option<AssignmentServiceClient> {
        request
            .app_data::<actix_web::web::Data<AssignmentServiceClient>>()
            .map(|data| data.get_ref().clone())
    }

    // 创建卡组
    pub async fn create_deck(
        &self,
        deck_data: CreateDeckRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_deck(self, deck_data, request).await
    }

    // 获取卡组详情
    pub async fn get_deck(
        &self,
        deck_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_deck(self, deck_id, request).await
    }

    // 卡组列表（按调用者角色过滤可见范围）
    pub async fn list_decks(
        &self,
        query: ContentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_decks(self, query, request).await
    }

    // 更新卡组
    pub async fn update_deck(
        &self,
        deck_id: &str,
        update_data: UpdateDeckRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_deck(self, deck_id, update_data, request).await
    }

    // 软删除卡组及其卡片
    pub async fn delete_deck(
        &self,
        deck_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_deck(self, deck_id, request).await
    }
}
