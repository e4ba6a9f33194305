use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeckService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, content::requests::UpdateDeckRequest};

pub async fn update_deck(
    service: &DeckService,
    deck_id: &str,
    update_data: UpdateDeckRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

    let deck = match storage.get_deck_by_id(deck_id).await {
        Ok(Some(deck)) => deck,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ContentNotFound,
                "Deck not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve deck: {e}"),
                )),
            );
        }
    };

    if user.role != UserRole::Admin && deck.instructor_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Only the deck instructor may modify this deck",
        )));
    }

    match storage.update_deck(deck_id, update_data).await {
        Ok(Some(deck)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deck,
            "Deck updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Deck not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Deck update failed: {e}"),
            )),
        ),
    }
}
