use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProgressService, require_user};
use crate::errors::LMSystemError;
use crate::models::assignments::requests::UpdateProgressRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_progress(
    service: &ProgressService,
    assignment_id: i64,
    update_data: UpdateProgressRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Some(completed) = update_data.completed_items
        && completed < 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Completed items must not be negative",
        )));
    }
    if let Some(total) = update_data.total_items
        && total < 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Total items must not be negative",
        )));
    }

    if let Err(response) = service
        .load_visible_assignment(assignment_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.update_progress(assignment_id, update_data).await {
        Ok(Some(progress)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            progress,
            "Progress updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(LMSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Progress update failed: {e}"),
            )),
        ),
    }
}
