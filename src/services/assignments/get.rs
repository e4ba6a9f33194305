use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::entities::{Assignment, ContentType, CourseProgress};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::access::can_view_assignment;

pub async fn get_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

    // 过期状态在读取前结算
    if let Err(e) = storage.mark_overdue_assignments().await {
        tracing::warn!("Failed to mark overdue assignments: {}", e);
    }

    let mut assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    // 课程类分配富化课程进度，尽力而为
    if assignment.content_type == ContentType::Course {
        assignment.course_progress = enrich_course_progress(service, &assignment, request).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment retrieved successfully",
    )))
}

/// 课程维度进度：课时总数来自 content 服务，任何失败都跳过富化
async fn enrich_course_progress(
    service: &AssignmentService,
    assignment: &Assignment,
    request: &HttpRequest,
) -> Option<CourseProgress> {
    let storage = service.get_storage(request);
    let progress = storage
        .get_progress_by_assignment(assignment.id)
        .await
        .ok()
        .flatten()?;

    let client = service.get_content_client(request)?;
    let bearer = RequireRemoteUser::extract_bearer(request)?;
    let total_lessons = client
        .course_lesson_total(&assignment.content_id, &bearer)
        .await?;

    Some(CourseProgress {
        completion_percentage: progress.completion_percentage,
        completed_lessons: progress.completed_items,
        total_lessons,
    })
}
