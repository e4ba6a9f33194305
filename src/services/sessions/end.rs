use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, require_user};
use crate::errors::LMSystemError;
use crate::models::assignments::requests::EndSessionRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn end_session(
    service: &SessionService,
    session_id: i64,
    end_data: EndSessionRequest,
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

    match storage.end_session(session_id, end_data).await {
        Ok(Some(session)) => {
            tracing::info!(
                "Study session {} ended by user {}, duration {:?} minute(s)",
                session_id,
                user.id,
                session.duration_minutes
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                session,
                "Study session ended successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SessionNotFound,
            "Study session not found",
        ))),
        Err(LMSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Study session end failed: {e}"),
            )),
        ),
    }
}
