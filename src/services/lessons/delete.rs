use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_lesson(
    service: &LessonService,
    lesson_id: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

    let lesson = match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ContentNotFound,
                "Lesson not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve lesson: {e}"),
                )),
            );
        }
    };

    if let Err(response) = service
        .load_owned_course(&lesson.course_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    // 软删除后父课程的课时数会重新统计
    match storage.delete_lesson(lesson_id).await {
        Ok(true) => {
            tracing::info!("Lesson {} deleted by user {}", lesson_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lesson deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Lesson deletion failed: {e}"),
            )),
        ),
    }
}
