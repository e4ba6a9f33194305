//! 分配存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::progress::ActiveModel as ProgressActiveModel;
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

fn encode_string_list(list: &Option<Vec<String>>) -> Result<Option<String>> {
    match list {
        Some(items) if !items.is_empty() => Ok(Some(serde_json::to_string(items)?)),
        _ => Ok(None),
    }
}

impl SeaOrmStorage {
    /// 创建分配并在同一事务内初始化零进度记录
    pub async fn create_assignment_impl(
        &self,
        instructor_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let supporting_decks = encode_string_list(&req.supporting_decks)?;
        let supporting_deck_titles = encode_string_list(&req.supporting_deck_titles)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            student_id: Set(req.student_id),
            content_type: Set(req.content_type.to_string()),
            content_id: Set(req.content_id),
            content_title: Set(req.content_title),
            supporting_decks: Set(supporting_decks),
            supporting_deck_titles: Set(supporting_deck_titles),
            title: Set(req.title),
            description: Set(req.description),
            instructions: Set(req.instructions),
            assigned_at: Set(now),
            due_date: Set(req.due_date.map(|dt| dt.timestamp())),
            completed_at: Set(None),
            status: Set(AssignmentStatus::Pending.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let assignment = model
            .insert(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建分配失败: {e}")))?;

        let progress = ProgressActiveModel {
            assignment_id: Set(assignment.id),
            total_items: Set(0),
            completed_items: Set(0),
            completion_percentage: Set(0.0),
            total_study_time_minutes: Set(0),
            sessions_count: Set(0),
            started_at: Set(None),
            last_accessed: Set(None),
            progress_details: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        progress
            .insert(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("初始化进度失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(assignment.into_assignment())
    }

    /// 通过 ID 获取活跃分配
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .filter(Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出分配
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 1000) as u64;

        let mut select = Assignments::find().filter(Column::IsActive.eq(true));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        if let Some(content_type) = query.content_type {
            select = select.filter(Column::ContentType.eq(content_type.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(due_before) = query.due_before {
            select = select.filter(Column::DueDate.lte(due_before.timestamp()));
        }

        if let Some(due_after) = query.due_after {
            select = select.filter(Column::DueDate.gte(due_after.timestamp()));
        }

        // 排序：最近分配的在前
        select = select.order_by_desc(Column::AssignedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新分配
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查分配是否存在
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(instructions) = update.instructions {
            model.instructions = Set(Some(instructions));
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
            // 人工置为完成时记录完成时间，离开完成态则清空
            if status == AssignmentStatus::Completed {
                model.completed_at = Set(Some(now));
            } else {
                model.completed_at = Set(None);
            }
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新分配失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 软删除分配
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(assignment_id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除分配失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 将过期未完成的活跃分配批量置为 overdue
    pub async fn mark_overdue_assignments_impl(&self) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(AssignmentStatus::Overdue.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::IsActive.eq(true))
            .filter(Column::DueDate.lt(now))
            .filter(Column::Status.is_in([
                AssignmentStatus::Pending.to_string(),
                AssignmentStatus::InProgress.to_string(),
            ]))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("标记过期分配失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
