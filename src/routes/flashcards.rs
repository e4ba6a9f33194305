use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{
    ChildListParams, CreateFlashcardRequest, ReorderRequest, UpdateFlashcardRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FlashcardService;
use crate::utils::SafeContentId;

// 懒加载的全局 FlashcardService 实例
static FLASHCARD_SERVICE: Lazy<FlashcardService> = Lazy::new(FlashcardService::new_lazy);

// 挂在 /api/v1/decks/{content_id}/flashcards 下，见 decks 路由
pub async fn list_deck_flashcards(
    req: HttpRequest,
    deck_id: SafeContentId,
    query: web::Query<ChildListParams>,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE
        .list_flashcards(&deck_id.0, query.into_inner(), &req)
        .await
}

// 挂在 /api/v1/decks/{content_id}/flashcards/reorder 下，见 decks 路由
pub async fn reorder_deck_flashcards(
    req: HttpRequest,
    deck_id: SafeContentId,
    reorder_data: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE
        .reorder_flashcards(&deck_id.0, reorder_data.into_inner(), &req)
        .await
}

pub async fn create_flashcard(
    req: HttpRequest,
    flashcard_data: web::Json<CreateFlashcardRequest>,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE
        .create_flashcard(flashcard_data.into_inner(), &req)
        .await
}

pub async fn get_flashcard(
    req: HttpRequest,
    flashcard_id: SafeContentId,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE.get_flashcard(&flashcard_id.0, &req).await
}

pub async fn update_flashcard(
    req: HttpRequest,
    flashcard_id: SafeContentId,
    update_data: web::Json<UpdateFlashcardRequest>,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE
        .update_flashcard(&flashcard_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_flashcard(
    req: HttpRequest,
    flashcard_id: SafeContentId,
) -> ActixResult<HttpResponse> {
    FLASHCARD_SERVICE
        .delete_flashcard(&flashcard_id.0, &req)
        .await
}

// 配置路由
pub fn configure_flashcard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/flashcards")
            .wrap(middlewares::RequireRemoteUser)
            .route("/{content_id}", web::get().to(get_flashcard))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_flashcard))
                    .route("/{content_id}", web::put().to(update_flashcard))
                    .route("/{content_id}", web::delete().to(delete_flashcard)),
            ),
    );
}
