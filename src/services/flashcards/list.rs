use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FlashcardService;
use crate::models::{
    ApiResponse, ErrorCode,
    content::requests::{ChildListParams, ChildListQuery},
};

pub async fn list_flashcards(
    service: &FlashcardService,
    deck_id: &str,
    query: ChildListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 卡片没有发布位，is_published 过滤在存储层被忽略
    let list_query = ChildListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        is_published: None,
    };

    let storage = service.get_storage(request);

    match storage.list_deck_flashcards(deck_id, list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Flashcard list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve flashcard list: {e}"),
            )),
        ),
    }
}
