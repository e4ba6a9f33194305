pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reorder;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::content::entities::Course;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::content::requests::{
    ChildListParams, CreateLessonRequest, ReorderRequest, UpdateLessonRequest,
};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 课时写操作要求父课程存在且归属调用者（管理员除外）
    pub(crate) async fn load_owned_course(
        &self,
        course_id: &str,
        user_id: i64,
        role: UserRole,
        request: &HttpRequest,
    ) -> Result<Course, HttpResponse> {
        let storage = self.get_storage(request);
        let course = match storage.get_course_by_id(course_id).await {
            Ok(Some(course)) => course,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ContentNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve course: {e}"),
                    )),
                );
            }
        };

        if role != UserRole::Admin && course.instructor_id != user_id {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "Only the course instructor may modify its lessons",
            )));
        }

        Ok(course)
    }

    // 创建课时
    pub async fn create_lesson(
        &self,
        lesson_data: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, lesson_data, request).await
    }

    // 获取课时详情
    pub async fn get_lesson(
        &self,
        lesson_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_lesson(self, lesson_id, request).await
    }

    // 课程下的课时列表（按 order 升序）
    pub async fn list_lessons(
        &self,
        course_id: &str,
        query: ChildListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, course_id, query, request).await
    }

    // 更新课时
    pub async fn update_lesson(
        &self,
        lesson_id: &str,
        update_data: UpdateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, lesson_id, update_data, request).await
    }

    // 软删除课时
    pub async fn delete_lesson(
        &self,
        lesson_id: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, lesson_id, request).await
    }

    // 批量重排课程下的课时
    pub async fn reorder_lessons(
        &self,
        course_id: &str,
        reorder_data: ReorderRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_lessons(self, course_id, reorder_data, request).await
    }
}
