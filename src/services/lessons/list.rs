use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    content::requests::{ChildListParams, ChildListQuery},
};

pub async fn list_lessons(
    service: &LessonService,
    course_id: &str,
    query: ChildListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let mut list_query = ChildListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        is_published: query.is_published,
    };

    // 学生只能看到已发布课时
    if user.role == UserRole::Student {
        list_query.is_published = Some(true);
    }

    let storage = service.get_storage(request);

    match storage.list_course_lessons(course_id, list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lesson list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve lesson list: {e}"),
            )),
        ),
    }
}
