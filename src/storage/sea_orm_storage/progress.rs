//! 学习进度存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{
    ActiveModel as AssignmentActiveModel, Column as AssignmentColumn, Entity as Assignments,
};
use crate::entity::progress::{ActiveModel, Column, Entity as ProgressRows};
use crate::entity::study_sessions::{Column as SessionColumn, Entity as StudySessions};
use crate::errors::{LMSystemError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentStatus, Progress, completion_percentage},
    requests::UpdateProgressRequest,
    responses::StudentProgressSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取分配的进度记录
    pub async fn get_progress_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Progress>> {
        let result = ProgressRows::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询进度失败: {e}")))?;

        Ok(result.map(|m| m.into_progress()))
    }

    /// 更新进度并级联分配状态
    ///
    /// 百分比始终由 completed/total 重新计算，完成度达到 100% 时
    /// 分配状态级联为 completed。
    pub async fn update_progress_impl(
        &self,
        assignment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Progress>> {
        let Some(assignment) = Assignments::find_by_id(assignment_id)
            .filter(AssignmentColumn::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配失败: {e}")))?
        else {
            return Ok(None);
        };

        let Some(existing) = ProgressRows::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询进度失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let total_items = update.total_items.unwrap_or(existing.total_items).max(0);
        let completed_items = update
            .completed_items
            .unwrap_or(existing.completed_items)
            .max(0);
        let percentage = completion_percentage(completed_items, total_items);

        let progress_details = match update.progress_details {
            Some(details) => Some(serde_json::to_string(&details)?),
            None => existing.progress_details.clone(),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            id: Set(existing.id),
            total_items: Set(total_items),
            completed_items: Set(completed_items),
            completion_percentage: Set(percentage),
            started_at: Set(existing.started_at.or(Some(now))),
            last_accessed: Set(Some(now)),
            progress_details: Set(progress_details),
            updated_at: Set(now),
            ..Default::default()
        };

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新进度失败: {e}")))?;

        // 分配状态级联
        let current_status = assignment
            .status
            .parse::<AssignmentStatus>()
            .unwrap_or(AssignmentStatus::Pending);

        let cascaded = if percentage >= 100.0 {
            Some((AssignmentStatus::Completed, Some(now)))
        } else if percentage > 0.0 && current_status != AssignmentStatus::InProgress {
            Some((AssignmentStatus::InProgress, None))
        } else {
            None
        };

        if let Some((status, completed_at)) = cascaded {
            let assignment_model = AssignmentActiveModel {
                id: Set(assignment_id),
                status: Set(status.to_string()),
                completed_at: Set(completed_at),
                updated_at: Set(now),
                ..Default::default()
            };

            assignment_model
                .update(&txn)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("级联分配状态失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_progress()))
    }

    /// 直接标记分配完成，进度置为 100%
    pub async fn complete_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = Assignments::find_by_id(assignment_id)
            .filter(AssignmentColumn::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let assignment_model = AssignmentActiveModel {
            id: Set(existing.id),
            status: Set(AssignmentStatus::Completed.to_string()),
            completed_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        let updated = assignment_model
            .update(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("标记分配完成失败: {e}")))?;

        if let Some(progress) = ProgressRows::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询进度失败: {e}")))?
        {
            let progress_model = ActiveModel {
                id: Set(progress.id),
                completed_items: Set(progress.total_items),
                completion_percentage: Set(100.0),
                started_at: Set(progress.started_at.or(Some(now))),
                last_accessed: Set(Some(now)),
                updated_at: Set(now),
                ..Default::default()
            };

            progress_model
                .update(&txn)
                .await
                .map_err(|e| LMSystemError::database_operation(format!("更新进度失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_assignment()))
    }

    /// 学生进度汇总
    pub async fn student_progress_summary_impl(
        &self,
        student_id: i64,
    ) -> Result<StudentProgressSummary> {
        let count_status = |status: AssignmentStatus| {
            Assignments::find()
                .filter(AssignmentColumn::StudentId.eq(student_id))
                .filter(AssignmentColumn::IsActive.eq(true))
                .filter(AssignmentColumn::Status.eq(status.to_string()))
                .count(&self.db)
        };

        let total = Assignments::find()
            .filter(AssignmentColumn::StudentId.eq(student_id))
            .filter(AssignmentColumn::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计分配总数失败: {e}")))?;

        let pending = count_status(AssignmentStatus::Pending)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计待开始分配失败: {e}")))?;
        let in_progress = count_status(AssignmentStatus::InProgress)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计进行中分配失败: {e}")))?;
        let completed = count_status(AssignmentStatus::Completed)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计已完成分配失败: {e}")))?;
        let overdue = count_status(AssignmentStatus::Overdue)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计过期分配失败: {e}")))?;

        // 已结束会话的学习时长合计
        let sessions = StudySessions::find()
            .filter(SessionColumn::StudentId.eq(student_id))
            .filter(SessionColumn::EndedAt.is_not_null())
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询学习会话失败: {e}")))?;

        let total_study_time_minutes: i64 = sessions
            .iter()
            .filter_map(|s| s.duration_minutes)
            .map(i64::from)
            .sum();

        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Ok(StudentProgressSummary {
            student_id,
            total_assignments: total as i64,
            pending: pending as i64,
            in_progress: in_progress as i64,
            completed: completed as i64,
            overdue: overdue as i64,
            completion_rate,
            total_study_time_minutes,
        })
    }
}
