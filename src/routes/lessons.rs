use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::content::requests::{
    ChildListParams, CreateLessonRequest, ReorderRequest, UpdateLessonRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LessonService;
use crate::utils::SafeContentId;

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// 挂在 /api/v1/courses/{content_id}/lessons 下，见 courses 路由
pub async fn list_course_lessons(
    req: HttpRequest,
    course_id: SafeContentId,
    query: web::Query<ChildListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .list_lessons(&course_id.0, query.into_inner(), &req)
        .await
}

// 挂在 /api/v1/courses/{content_id}/lessons/reorder 下，见 courses 路由
pub async fn reorder_course_lessons(
    req: HttpRequest,
    course_id: SafeContentId,
    reorder_data: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .reorder_lessons(&course_id.0, reorder_data.into_inner(), &req)
        .await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(lesson_data.into_inner(), &req)
        .await
}

pub async fn get_lesson(req: HttpRequest, lesson_id: SafeContentId) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson(&lesson_id.0, &req).await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeContentId,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&lesson_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    lesson_id: SafeContentId,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&lesson_id.0, &req).await
}

// 配置路由
pub fn configure_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .wrap(middlewares::RequireRemoteUser)
            .route("/{content_id}", web::get().to(get_lesson))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_lesson))
                    .route("/{content_id}", web::put().to(update_lesson))
                    .route("/{content_id}", web::delete().to(delete_lesson)),
            ),
    );
}
