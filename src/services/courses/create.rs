use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreateCourseRequest};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if course_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Course title must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    // 讲师名缓存在课程行上，缺失全名时退回用户名
    let instructor_name = user.full_name.clone().or(Some(user.username.clone()));

    match storage
        .create_course(user.id, instructor_name, course_data)
        .await
    {
        Ok(course) => {
            tracing::info!("Course {} created by user {}", course.id, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course creation failed: {e}"),
            )),
        ),
    }
}
