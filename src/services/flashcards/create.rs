use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FlashcardService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreateFlashcardRequest};

pub async fn create_flashcard(
    service: &FlashcardService,
    flashcard_data: CreateFlashcardRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if flashcard_data.front.trim().is_empty() || flashcard_data.back.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Flashcard front and back must not be empty",
        )));
    }

    if flashcard_data.order < 1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Flashcard order must be at least 1",
        )));
    }

    if let Err(response) = service
        .load_owned_deck(&flashcard_data.deck_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.create_flashcard(flashcard_data).await {
        Ok(flashcard) => {
            tracing::info!(
                "Flashcard {} created in deck {}",
                flashcard.id,
                flashcard.deck_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                flashcard,
                "Flashcard created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Flashcard creation failed: {e}"),
            )),
        ),
    }
}
