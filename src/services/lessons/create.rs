use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreateLessonRequest};
use crate::utils::validate::validate_http_url;

pub async fn create_lesson(
    service: &LessonService,
    lesson_data: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if lesson_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Lesson title must not be empty",
        )));
    }

    if lesson_data.order < 1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Lesson order must be at least 1",
        )));
    }

    // 媒体 URL 只接受 http(s)
    for url in [&lesson_data.image_url, &lesson_data.video_url]
        .into_iter()
        .flatten()
    {
        if let Err(msg) = validate_http_url(url) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    }

    if let Err(response) = service
        .load_owned_course(&lesson_data.course_id, user.id, user.role, request)
        .await
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);

    match storage.create_lesson(lesson_data).await {
        Ok(lesson) => {
            tracing::info!("Lesson {} created in course {}", lesson.id, lesson.course_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(lesson, "Lesson created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Lesson creation failed: {e}"),
            )),
        ),
    }
}
