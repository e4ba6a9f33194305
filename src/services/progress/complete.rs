use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProgressService, require_user};
use crate::models::{ApiResponse, ErrorCode};

pub async fn complete_assignment(
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

    match storage.complete_assignment(assignment_id).await {
        Ok(Some(assignment)) => {
            tracing::info!(
                "Assignment {} marked complete by user {}",
                assignment_id,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Assignment completed successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Assignment completion failed: {e}"),
            )),
        ),
    }
}
