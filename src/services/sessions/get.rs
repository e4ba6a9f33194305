use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, require_user};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::access::can_view_assignment;

pub async fn get_session(
    service: &SessionService,
    session_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    let session = match storage.get_session_by_id(session_id).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SessionNotFound,
                "Study session not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve study session: {e}"),
                )),
            );
        }
    };

    // 可见性跟随所属分配：学生本人、布置的教师、管理员
    let visible = match storage.get_assignment_by_id(session.assignment_id).await {
        Ok(Some(assignment)) => can_view_assignment(
            user.role,
            user.id,
            assignment.student_id,
            assignment.instructor_id,
        ),
        Ok(None) => user.role == crate::models::users::entities::UserRole::Admin,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment: {e}"),
                )),
            );
        }
    };

    if !visible {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "You do not have access to this study session",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        session,
        "Study session retrieved successfully",
    )))
}
