use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, require_user};
use crate::models::common::PaginationQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::access::can_view_assignment;

pub async fn list_assignment_sessions(
    service: &SessionService,
    assignment_id: i64,
    pagination: PaginationQuery,
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

    if !can_view_assignment(
        user.role,
        user.id,
        assignment.student_id,
        assignment.instructor_id,
    ) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "You do not have access to this assignment",
        )));
    }

    match storage
        .list_assignment_sessions(assignment_id, pagination)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Study sessions retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve study sessions: {e}"),
            )),
        ),
    }
}

pub async fn list_student_sessions(
    service: &SessionService,
    student_id: i64,
    pagination: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 学生只能列自己的会话，教师和管理员不受限
    if user.role == UserRole::Student && user.id != student_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Students can only view their own study sessions",
        )));
    }

    let storage = service.get_storage(request);

    match storage.list_student_sessions(student_id, pagination).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Study sessions retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve study sessions: {e}"),
            )),
        ),
    }
}
