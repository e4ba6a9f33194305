use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DeckService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreateDeckRequest};

pub async fn create_deck(
    service: &DeckService,
    deck_data: CreateDeckRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if deck_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Deck title must not be empty",
        )));
    }

    let storage = service.get_storage(request);
    let instructor_name = user.full_name.clone().or(Some(user.username.clone()));

    // 标签在存储层规范化（去空白、转小写、去重、截断）
    match storage
        .create_deck(user.id, instructor_name, deck_data)
        .await
    {
        Ok(deck) => {
            tracing::info!("Deck {} created by user {}", deck.id, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(deck, "Deck created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Deck creation failed: {e}"),
            )),
        ),
    }
}
