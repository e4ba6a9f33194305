pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reorder;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::content::entities::Deck;
use crate::models::content::requests::{
    ChildListParams, CreateFlashcardRequest, ReorderRequest, UpdateFlashcardRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct FlashcardService {
    storage: Option<Arc<dyn Storage>>,
}

impl FlashcardService {
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

    // 卡片写操作要求父卡组存在且归属调用者（管理员除外）
    pub(crate) async fn load_owned_deck(
        &self,
        deck_id: &str,
        user_id: i64,
        role: UserRole,
        request: &HttpRequest,
    ) -> Result<Deck, HttpResponse> {
        let storage = self.get_storage(request);
        let deck = match storage.get_deck_by_id(deck_id).await {
            Ok(Some(deck)) => deck,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ContentNotFound,
                    "Deck not found",
                )));
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve deck: {e}"),
                    )),
                );
            }
        };

        if role != UserRole::Admin && deck.instructor_id != user_id {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "Only the deck instructor may modify its flashcards",
            )));
        }

        Ok(deck)
    }

    // 创建抽认卡
    pub async fn create_flashcard(
        &self,
        flashcard_data: CreateFlashcardRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_flashcard(self, flashcard_data, request).await
    }

    // 获取抽认卡详情
    pub async fn get_flashcard(
        &self,
        flashcard_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_flashcard(self, flashcard_id, request).await
    }

    // 卡组下的卡片列表（按 order 升序）
    pub async fn list_flashcards(
        &self,
        deck_id: &str,
        query: ChildListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_flashcards(self, deck_id, query, request).await
    }

    // 更新抽认卡
    pub async fn update_flashcard(
        &self,
        flashcard_id: &str,
        update_data: UpdateFlashcardRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_flashcard(self, flashcard_id, update_data, request).await
    }

    // 软删除抽认卡
    pub async fn delete_flashcard(
        &self,
        flashcard_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_flashcard(self, flashcard_id, request).await
    }

    // 批量重排卡组下的卡片
    pub async fn reorder_flashcards(
        &self,
        deck_id: &str,
        reorder_data: ReorderRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_flashcards(self, deck_id, reorder_data, request).await
    }
}
