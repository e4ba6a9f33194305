use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FlashcardService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::UpdateFlashcardRequest};

pub async fn update_flashcard(
    service: &FlashcardService,
    flashcard_id: &str,
    update_data: UpdateFlashcardRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if let Some(order) = update_data.order
        && order < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Flashcard order must be at least 1",
        )));
    }

    let storage = service.get_storage(request);

    // 卡片归属经由父卡组校验
    let flashcard = match storage.get_flashcard_by_id(flashcard_id).await {
        Ok(Some(flashcard)) => flashcard,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ContentNotFound,
                "Flashcard not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve flashcard: {e}"),
                )),
            );
        }
    };

    if let Err(response) = service
        .load_owned_deck(&flashcard.deck_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    match storage.update_flashcard(flashcard_id, update_data).await {
        Ok(Some(flashcard)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            flashcard,
            "Flashcard updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Flashcard not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Flashcard update failed: {e}"),
            )),
        ),
    }
}
