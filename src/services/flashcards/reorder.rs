use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::FlashcardService;
use crate::errors::LMSystemError;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::content::responses::ReorderResponse;
use crate::models::{ApiResponse, ErrorCode, content::requests::ReorderRequest};

pub async fn reorder_flashcards(
    service: &FlashcardService,
    deck_id: &str,
    reorder_data: ReorderRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if reorder_data.items.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Reorder list must not be empty",
        )));
    }

    // 重复的 order 值在任何写入前拒绝
    let mut seen_orders = HashSet::new();
    for item in &reorder_data.items {
        if item.order < 1 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                "Flashcard order must be at least 1",
            )));
        }
        if !seen_orders.insert(item.order) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                format!("Duplicate order value in reorder list: {}", item.order),
            )));
        }
    }

    if let Err(response) = service
        .load_owned_deck(deck_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.reorder_flashcards(deck_id, reorder_data.items).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReorderResponse { updated },
            "Flashcards reordered successfully",
        ))),
        Err(LMSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Flashcard reorder failed: {e}"),
            )),
        ),
    }
}
