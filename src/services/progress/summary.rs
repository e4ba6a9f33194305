use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ProgressService, require_user};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn student_summary(
    service: &ProgressService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 学生只能看自己的汇总，教师和管理员不受限
    if user.role == UserRole::Student && user.id != student_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PermissionDenied,
            "Students can only view their own progress summary",
        )));
    }

    let storage = service.get_storage(request);

    if let Err(e) = storage.mark_overdue_assignments().await {
        tracing::warn!("Failed to mark overdue assignments: {}", e);
    }

    match storage.student_progress_summary(student_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Progress summary retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve progress summary: {e}"),
            )),
        ),
    }
}
