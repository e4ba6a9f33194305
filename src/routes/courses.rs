use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{
    ContentListParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeContentId;

use super::lessons::{list_course_lessons, reorder_course_lessons};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<ContentListParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeContentId) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&course_id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeContentId,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&course_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeContentId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&course_id.0, &req).await
}

// 配置路由
//
// 课时的父级子列表和重排挂在课程前缀下，路径参数统一叫 content_id。
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireRemoteUser)
            .route("", web::get().to(list_courses))
            .route("/{content_id}", web::get().to(get_course))
            .route("/{content_id}/lessons", web::get().to(list_course_lessons))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_course))
                    .route("/{content_id}", web::put().to(update_course))
                    .route("/{content_id}", web::delete().to(delete_course))
                    .route(
                        "/{content_id}/lessons/reorder",
                        web::put().to(reorder_course_lessons),
                    ),
            ),
    );
}
