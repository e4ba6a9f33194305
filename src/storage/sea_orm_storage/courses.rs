//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    content::{
        entities::Course,
        requests::{ContentListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, ExprTrait, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(req.title),
            description: Set(req.description),
            instructor_id: Set(instructor_id),
            instructor_name: Set(instructor_name),
            total_lessons: Set(0),
            estimated_duration_minutes: Set(req.estimated_duration_minutes),
            is_active: Set(true),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程，软删除的记录也返回
    pub async fn get_course_by_id_impl(&self, course_id: &str) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: ContentListQuery,
    ) -> Result<CourseListResponse> {
        let page = std::cmp::Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find().filter(Column::IsActive.eq(true));

        // 搜索条件（标题或描述），LIKE 带显式 ESCAPE，通配符按字面量匹配
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Expr::col(Column::Title).like(LikeExpr::new(&pattern).escape('\\')))
                    .add(Expr::col(Column::Description).like(LikeExpr::new(&pattern).escape('\\'))),
            );
        }

        // 发布状态筛选
        if let Some(is_published) = query.is_published {
            select = select.filter(Column::IsPublished.eq(is_published));
        }

        // 讲师筛选
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 学生可见范围：已分配的内容或已发布内容
        if let Some(visible_ids) = query.visible_ids {
            select = select.filter(
                Condition::any()
                    .add(Column::Id.is_in(visible_ids))
                    .add(Column::IsPublished.eq(true)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(minutes) = update.estimated_duration_minutes {
            model.estimated_duration_minutes = Set(Some(minutes));
        }

        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 软删除课程及其课时
    pub async fn delete_course_impl(&self, course_id: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Courses::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(course_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除课程失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }

        // 级联软删除课时
        Lessons::update_many()
            .col_expr(
                LessonColumn::IsActive,
                sea_orm::sea_query::Expr::value(false),
            )
            .col_expr(
                LessonColumn::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(LessonColumn::CourseId.eq(course_id))
            .filter(LessonColumn::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除课程课时失败: {e}")))?;

        Ok(true)
    }

    /// 重算课程的活跃课时数
    pub(crate) async fn recompute_course_lesson_count(&self, course_id: &str) -> Result<()> {
        let count = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .filter(LessonColumn::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计课时数量失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        Courses::update_many()
            .col_expr(
                Column::TotalLessons,
                sea_orm::sea_query::Expr::value(count as i32),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新课时计数失败: {e}")))?;

        Ok(())
    }
}
