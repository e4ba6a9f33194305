use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProgressService, require_user};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_progress(
    service: &ProgressService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = service
        .load_visible_assignment(assignment_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.get_progress_by_assignment(assignment_id).await {
        Ok(Some(progress)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Progress retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "No progress recorded for this assignment",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve progress: {e}"),
            )),
        ),
    }
}
