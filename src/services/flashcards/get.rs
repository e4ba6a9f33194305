use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FlashcardService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_flashcard(
    service: &FlashcardService,
    flashcard_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_flashcard_by_id(flashcard_id).await {
        Ok(Some(flashcard)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            flashcard,
            "Flashcard retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Flashcard not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve flashcard: {e}"),
            )),
        ),
    }
}
