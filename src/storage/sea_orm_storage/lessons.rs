//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    content::{
        entities::Lesson,
        requests::{ChildListQuery, CreateLessonRequest, ReorderItem, UpdateLessonRequest},
        responses::LessonListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashSet;

impl SeaOrmStorage {
    /// 创建课时并重算课程计数
    pub async fn create_lesson_impl(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            course_id: Set(req.course_id.clone()),
            title: Set(req.title),
            content: Set(req.content),
            order: Set(req.order),
            image_url: Set(req.image_url),
            video_url: Set(req.video_url),
            duration_minutes: Set(req.duration_minutes),
            is_active: Set(true),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建课时失败: {e}")))?;

        self.recompute_course_lesson_count(&req.course_id).await?;

        Ok(result.into_lesson())
    }

    /// 通过 ID 获取课时，软删除的记录也返回
    pub async fn get_lesson_by_id_impl(&self, lesson_id: &str) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 分页列出课程下的课时，按排序值升序
    pub async fn list_course_lessons_impl(
        &self,
        course_id: &str,
        query: ChildListQuery,
    ) -> Result<LessonListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Lessons::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::IsActive.eq(true));

        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        select = select.order_by_asc(Column::Order);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时页数失败: {e}")))?;

        let lessons = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(LessonListResponse {
            items: lessons.into_iter().map(|m| m.into_lesson()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课时
    pub async fn update_lesson_impl(
        &self,
        lesson_id: &str,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        // 先检查课时是否存在
        let existing = self.get_lesson_by_id_impl(lesson_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(lesson_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }

        if let Some(order) = update.order {
            model.order = Set(order);
        }

        if let Some(image_url) = update.image_url {
            model.image_url = Set(Some(image_url));
        }

        if let Some(video_url) = update.video_url {
            model.video_url = Set(Some(video_url));
        }

        if let Some(minutes) = update.duration_minutes {
            model.duration_minutes = Set(Some(minutes));
        }

        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_lesson_by_id_impl(lesson_id).await
    }

    /// 软删除课时并重算课程计数
    pub async fn delete_lesson_impl(&self, lesson_id: &str) -> Result<bool> {
        let Some(lesson) = self.get_lesson_by_id_impl(lesson_id).await? else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();

        let result = Lessons::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(lesson_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除课时失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        self.recompute_course_lesson_count(&lesson.course_id)
            .await?;

        Ok(true)
    }

    /// 批量重排课程下的课时
    ///
    /// 重复的课时 ID 会在写入前整体拒绝；不属于该课程的 ID 被忽略。
    pub async fn reorder_lessons_impl(
        &self,
        course_id: &str,
        items: Vec<ReorderItem>,
    ) -> Result<i64> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(LMSystemError::validation(format!(
                    "重排列表包含重复课时 ID: {}",
                    item.id
                )));
            }
        }

        let now = chrono::Utc::now().timestamp();
        let mut updated = 0i64;

        for item in items {
            let result = Lessons::update_many()
                .col_expr(Column::Order, sea_orm::sea_query::Expr::value(item.order))
                .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
                .filter(Column::Id.eq(item.id))
                .filter(Column::CourseId.eq(course_id))
                .filter(Column::IsActive.eq(true))
                .exec(&self.db)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("重排课时失败: {e}")))?;

            updated += result.rows_affected as i64;
        }

        Ok(updated)
    }
}
