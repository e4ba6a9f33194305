use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::UpdateLessonRequest};
use crate::utils::validate::validate_http_url;

pub async fn update_lesson(
    service: &LessonService,
    lesson_id: &str,
    update_data: UpdateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if let Some(order) = update_data.order
        && order < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Lesson order must be at least 1",
        )));
    }

    for url in [&update_data.image_url, &update_data.video_url]
        .into_iter()
        .flatten()
    {
        if let Err(msg) = validate_http_url(url) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    }

    let storage = service.get_storage(request);

    // 课时归属经由父课程校验
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

    match storage.update_lesson(lesson_id, update_data).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ContentNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Lesson update failed: {e}"),
            )),
        ),
    }
}
