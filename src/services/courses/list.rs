use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::CourseService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    content::requests::{ContentListParams, ContentListQuery},
};

pub async fn list_courses(
    service: &CourseService,
    query: ContentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let mut list_query = ContentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        is_published: query.is_published,
        instructor_id: query.instructor_id,
        category: None,
        visible_ids: None,
    };

    // 学生只能看到分配给自己的课程加已发布课程；
    // assignment 服务不可达时降级为仅已发布内容
    if user.role == UserRole::Student {
        list_query.instructor_id = None;
        match assigned_course_ids(service, user.id, request).await {
            Some(ids) => list_query.visible_ids = Some(ids),
            None => {
                list_query.visible_ids = None;
                list_query.is_published = Some(true);
            }
        }
    }

    let storage = service.get_storage(request);

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve course list: {e}"),
            )),
        ),
    }
}

async fn assigned_course_ids(
    service: &CourseService,
    student_id: i64,
    request: &HttpRequest,
) -> Option<Vec<String>> {
    let client = service.get_assignment_client(request)?;
    let bearer = RequireRemoteUser::extract_bearer(request)?;

    match client
        .assigned_content_ids(student_id, "course", &bearer)
        .await
    {
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!(
                "Assignment lookup failed for student {}, degrading to published-only: {}",
                student_id, e
            );
            None
        }
    }
}
