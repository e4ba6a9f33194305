use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, require_user};
use crate::models::assignments::requests::StartSessionRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn start_session(
    service: &SessionService,
    assignment_id: i64,
    session_data: StartSessionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment: {e}"),
                )),
            );
        }
    };

    // 会话归属分配的学生，只有学生本人（或管理员代操作）能开始
    if user.role != UserRole::Admin && assignment.student_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Only the assigned student can start a study session",
        )));
    }

    match storage
        .start_session(assignment_id, assignment.student_id, session_data)
        .await
    {
        Ok(session) => {
            tracing::info!(
                "Study session {} started for assignment {} by user {}",
                session.id,
                assignment_id,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                session,
                "Study session started successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to start study session: {e}"),
            )),
        ),
    }
}
