use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FlashcardService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_flashcard(
    service: &FlashcardService,
    flashcard_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

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

    // 软删除后父卡组的卡片数会重新统计
    match storage.delete_flashcard(flashcard_id).await {
        Ok(true) => {
            tracing::info!("Flashcard {} deleted by user {}", flashcard_id, user.id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Flashcard deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Flashcard not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Flashcard deletion failed: {e}"),
            )),
        ),
    }
}
