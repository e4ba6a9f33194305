use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, require_user};
use crate::errors::LMSystemError;
use crate::models::assignments::requests::UpdateSessionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_session(
    service: &SessionService,
    session_id: i64,
    update_data: UpdateSessionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = service.load_owned_session(session_id, &user, request).await {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.update_session(session_id, update_data).await {
        Ok(Some(session)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            session,
            "Study session updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SessionNotFound,
            "Study session not found",
        ))),
        Err(LMSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Study session update failed: {e}"),
            )),
        ),
    }
}
