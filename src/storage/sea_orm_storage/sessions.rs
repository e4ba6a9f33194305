//! 学习会话存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::progress::{
    ActiveModel as ProgressActiveModel, Column as ProgressColumn, Entity as ProgressRows,
};
use crate::entity::study_sessions::{ActiveModel, Column, Entity as StudySessions, Model};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{StudySession, completion_percentage, session_duration_minutes},
        requests::{EndSessionRequest, StartSessionRequest, UpdateSessionRequest},
        responses::SessionListResponse,
    },
    common::PaginationQuery,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 开始学习会话
    ///
    /// 同一分配下学生的历史活跃会话先被强制结束并结算时长，
    /// 保证任一时刻最多一个活跃会话。
    pub async fn start_session_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: StartSessionRequest,
    ) -> Result<StudySession> {
        let assignment = Assignments::find_by_id(assignment_id)
            .filter(AssignmentColumn::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询分配失败: {e}")))?;

        if assignment.is_none() {
            return Err(LMSystemError::not_found(format!(
                "分配不存在: {assignment_id}"
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        // 强制结束历史活跃会话
        let stale = StudySessions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsActive.eq(true))
            .all(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询活跃会话失败: {e}")))?;

        for session in stale {
            Self::force_end_session(&txn, &session, now).await?;
        }

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            started_at: Set(now),
            ended_at: Set(None),
            duration_minutes: Set(None),
            items_studied: Set(0),
            items_completed: Set(0),
            session_progress: Set(0.0),
            session_notes: Set(req.session_notes),
            items_details: Set(None),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let session = model
            .insert(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建会话失败: {e}")))?;

        Self::recompute_progress_rollup(&txn, assignment_id, now).await?;

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(session.into_study_session())
    }

    /// 通过 ID 获取会话
    pub async fn get_session_by_id_impl(&self, session_id: i64) -> Result<Option<StudySession>> {
        let result = StudySessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话失败: {e}")))?;

        Ok(result.map(|m| m.into_study_session()))
    }

    /// 获取学生在分配下的活跃会话
    pub async fn get_active_session_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudySession>> {
        let result = StudySessions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::StartedAt)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询活跃会话失败: {e}")))?;

        Ok(result.map(|m| m.into_study_session()))
    }

    /// 更新活跃会话的进行中指标
    pub async fn update_session_impl(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<StudySession>> {
        let Some(existing) = StudySessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话失败: {e}")))?
        else {
            return Ok(None);
        };

        if !existing.is_active {
            return Err(LMSystemError::validation(format!(
                "会话已结束，无法更新: {session_id}"
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let items_studied = update.items_studied.unwrap_or(existing.items_studied).max(0);
        let items_completed = update
            .items_completed
            .unwrap_or(existing.items_completed)
            .max(0);

        let items_details = match update.items_details {
            Some(details) => Some(serde_json::to_string(&details)?),
            None => existing.items_details.clone(),
        };

        let mut model = ActiveModel {
            id: Set(session_id),
            items_studied: Set(items_studied),
            items_completed: Set(items_completed),
            session_progress: Set(completion_percentage(items_completed, items_studied)),
            items_details: Set(items_details),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(notes) = update.session_notes {
            model.session_notes = Set(Some(notes));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新会话失败: {e}")))?;

        // 进度的最近访问时间
        ProgressRows::update_many()
            .col_expr(
                ProgressColumn::LastAccessed,
                sea_orm::sea_query::Expr::value(now),
            )
            .col_expr(
                ProgressColumn::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(ProgressColumn::AssignmentId.eq(existing.assignment_id))
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新最近访问时间失败: {e}")))?;

        Ok(Some(updated.into_study_session()))
    }

    /// 结束会话，结算时长并重算进度累计
    pub async fn end_session_impl(
        &self,
        session_id: i64,
        req: EndSessionRequest,
    ) -> Result<Option<StudySession>> {
        let Some(existing) = StudySessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话失败: {e}")))?
        else {
            return Ok(None);
        };

        if !existing.is_active {
            return Err(LMSystemError::validation(format!(
                "会话已结束: {session_id}"
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let items_studied = req.items_studied.unwrap_or(existing.items_studied).max(0);
        let items_completed = req
            .items_completed
            .unwrap_or(existing.items_completed)
            .max(0);

        let started = DateTime::<Utc>::from_timestamp(existing.started_at, 0).unwrap_or_default();
        let ended = DateTime::<Utc>::from_timestamp(now, 0).unwrap_or_default();
        let duration = session_duration_minutes(started, ended);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let mut model = ActiveModel {
            id: Set(session_id),
            ended_at: Set(Some(now)),
            duration_minutes: Set(Some(duration)),
            items_studied: Set(items_studied),
            items_completed: Set(items_completed),
            session_progress: Set(completion_percentage(items_completed, items_studied)),
            is_active: Set(false),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(notes) = req.session_notes {
            model.session_notes = Set(Some(notes));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("结束会话失败: {e}")))?;

        Self::recompute_progress_rollup(&txn, existing.assignment_id, now).await?;

        txn.commit()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(updated.into_study_session()))
    }

    /// 分页列出分配下的会话，最近的在前
    pub async fn list_assignment_sessions_impl(
        &self,
        assignment_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse> {
        let select = StudySessions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::StartedAt);

        Self::paginate_sessions(&self.db, select, pagination).await
    }

    /// 分页列出学生的全部会话，最近的在前
    pub async fn list_student_sessions_impl(
        &self,
        student_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse> {
        let select = StudySessions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::StartedAt);

        Self::paginate_sessions(&self.db, select, pagination).await
    }

    async fn paginate_sessions<C: ConnectionTrait>(
        db: &C,
        select: sea_orm::Select<StudySessions>,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse> {
        let page = pagination.page.max(1) as u64;
        let size = pagination.size.clamp(1, 100) as u64;

        let paginator = select.paginate(db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话页数失败: {e}")))?;

        let sessions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话列表失败: {e}")))?;

        Ok(SessionListResponse {
            items: sessions.into_iter().map(|m| m.into_study_session()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 结算一个遗留的活跃会话
    async fn force_end_session<C: ConnectionTrait>(
        db: &C,
        session: &Model,
        now: i64,
    ) -> Result<()> {
        let started = DateTime::<Utc>::from_timestamp(session.started_at, 0).unwrap_or_default();
        let ended = DateTime::<Utc>::from_timestamp(now, 0).unwrap_or_default();
        let duration = session_duration_minutes(started, ended);

        let model = ActiveModel {
            id: Set(session.id),
            ended_at: Set(Some(now)),
            duration_minutes: Set(Some(duration)),
            is_active: Set(false),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("结算遗留会话失败: {e}")))?;

        Ok(())
    }

    /// 从已结束的会话行重算进度的会话数与累计学习时长
    ///
    /// 进行中的会话不计入，计数在会话结束时才增长。
    async fn recompute_progress_rollup<C: ConnectionTrait>(
        db: &C,
        assignment_id: i64,
        now: i64,
    ) -> Result<()> {
        let sessions = StudySessions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::EndedAt.is_not_null())
            .all(db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询会话失败: {e}")))?;

        let sessions_count = sessions.len() as i32;
        let total_minutes: i32 = sessions.iter().filter_map(|s| s.duration_minutes).sum();

        let Some(progress) = ProgressRows::find()
            .filter(ProgressColumn::AssignmentId.eq(assignment_id))
            .one(db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询进度失败: {e}")))?
        else {
            return Ok(());
        };

        let model = ProgressActiveModel {
            id: Set(progress.id),
            sessions_count: Set(sessions_count),
            total_study_time_minutes: Set(total_minutes),
            started_at: Set(progress.started_at.or(Some(now))),
            last_accessed: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("重算进度累计失败: {e}")))?;

        Ok(())
    }
}
