use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::requests::{AssignmentListParams, AssignmentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::access::scope_assignment_filters;

pub async fn list_assignments(
    service: &AssignmentService,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

    if let Err(e) = storage.mark_overdue_assignments().await {
        tracing::warn!("Failed to mark overdue assignments: {}", e);
    }

    // 身份约束改写请求里的过滤条件
    let scope = scope_assignment_filters(user.role, user.id, query.student_id, query.instructor_id);

    let list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: scope.student_id,
        instructor_id: scope.instructor_id,
        content_type: query.content_type,
        status: query.status,
        due_before: query.due_before,
        due_after: query.due_after,
    };

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assignments: {e}"),
            )),
        ),
    }
}
