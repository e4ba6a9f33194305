use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::AssignmentService;
use crate::errors::LMSystemError;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::entities::ContentType;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};

pub async fn create_assignment(
    service: &AssignmentService,
    mut assignment_data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Assignment title must not be empty",
        )));
    }

    let bearer = RequireRemoteUser::extract_bearer(request).unwrap_or_default();

    // 学生存在性回查 fail-open：auth 服务抖动不阻塞创建，
    // 明确的 404 才会拒绝
    if let Some(auth_client) = service.get_auth_client(request)
        && !auth_client
            .validate_user(assignment_data.student_id, &bearer)
            .await
    {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Student not found",
        )));
    }

    // 课程类内容 fail-closed 校验；卡组类内容不回查（与原始行为一致）
    if assignment_data.content_type == ContentType::Course {
        let Some(content_client) = service.get_content_client(request) else {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Content client not configured",
                )),
            );
        };

        match content_client
            .get_course(&assignment_data.content_id, &bearer)
            .await
        {
            Ok(Some(course)) => {
                // 缺失的内容标题从课程回填
                if assignment_data.content_title.is_none() {
                    assignment_data.content_title = Some(course.title);
                }
            }
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ContentNotFound,
                    "Assigned course not found",
                )));
            }
            Err(LMSystemError::UpstreamUnavailable(msg)) => {
                warn!("Course validation unavailable: {}", msg);
                return Ok(
                    HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                        ErrorCode::UpstreamUnavailable,
                        "Content service unavailable",
                    )),
                );
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Course validation failed: {e}"),
                    )),
                );
            }
        }
    }

    let storage = service.get_storage(request);

    match storage.create_assignment(user.id, assignment_data).await {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} created by instructor {} for student {}",
                assignment.id,
                user.id,
                assignment.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Assignment creation failed: {e}"),
            )),
        ),
    }
}
