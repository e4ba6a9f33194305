use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeckService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_deck(
    service: &DeckService,
    deck_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_deck_by_id(deck_id).await {
        Ok(Some(deck)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deck,
            "Deck retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Deck not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve deck: {e}"),
            )),
        ),
    }
}
