use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{ContentListParams, CreateDeckRequest, UpdateDeckRequest};
use crate::models::users::entities::UserRole;
use crate::services::DeckService;
use crate::utils::SafeContentId;

use super::flashcards::{list_deck_flashcards, reorder_deck_flashcards};

// 懒加载的全局 DeckService 实例
static DECK_SERVICE: Lazy<DeckService> = Lazy::new(DeckService::new_lazy);

pub async fn list_decks(
    req: HttpRequest,
    query: web::Query<ContentListParams>,
) -> ActixResult<HttpResponse> {
    DECK_SERVICE.list_decks(query.into_inner(), &req).await
}

pub async fn create_deck(
    req: HttpRequest,
    deck_data: web::Json<CreateDeckRequest>,
) -> ActixResult<HttpResponse> {
    DECK_SERVICE.create_deck(deck_data.into_inner(), &req).await
}

pub async fn get_deck(req: HttpRequest, deck_id: SafeContentId) -> ActixResult<HttpResponse> {
    DECK_SERVICE.get_deck(&deck_id.0, &req).await
}

pub async fn update_deck(
    req: HttpRequest,
    deck_id: SafeContentId,
    update_data: web::Json<UpdateDeckRequest>,
) -> ActixResult<HttpResponse> {
    DECK_SERVICE
        .update_deck(&deck_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_deck(req: HttpRequest, deck_id: SafeContentId) -> ActixResult<HttpResponse> {
    DECK_SERVICE.delete_deck(&deck_id.0, &req).await
}

// 配置路由
//
// 抽认卡的父级子列表和重排挂在卡组前缀下，路径参数统一叫 content_id。
pub fn configure_deck_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/decks")
            .wrap(middlewares::RequireRemoteUser)
            .route("", web::get().to(list_decks))
            .route("/{content_id}", web::get().to(get_deck))
            .route(
                "/{content_id}/flashcards",
                web::get().to(list_deck_flashcards),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_deck))
                    .route("/{content_id}", web::put().to(update_deck))
                    .route("/{content_id}", web::delete().to(delete_deck))
                    .route(
                        "/{content_id}/flashcards/reorder",
                        web::put().to(reorder_deck_flashcards),
                    ),
            ),
    );
}
