//! 学习分析存储操作
//!
//! 分析指标全部从分配与会话源数据行即时计算，不落地中间表。

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::study_sessions::{Column as SessionColumn, Entity as StudySessions};
use crate::errors::{LMSystemError, Result};
use crate::models::assignments::{
    entities::AssignmentStatus,
    responses::{LearningAnalytics, StudentSessionStats},
};
use chrono::{DateTime, Datelike, Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::BTreeSet;

impl SeaOrmStorage {
    /// 窗口期学习分析
    ///
    /// 统计窗口内的分配完成率与已结束会话的平均时长，
    /// 讲师与学生过滤可同时叠加。
    pub async fn learning_analytics_impl(
        &self,
        instructor_id: Option<i64>,
        student_id: Option<i64>,
        days: i64,
    ) -> Result<LearningAnalytics> {
        let days = days.clamp(1, 365);
        let cutoff = (Utc::now() - Duration::days(days)).timestamp();

        let mut select = Assignments::find()
            .filter(AssignmentColumn::IsActive.eq(true))
            .filter(AssignmentColumn::AssignedAt.gte(cutoff));

        if let Some(instructor_id) = instructor_id {
            select = select.filter(AssignmentColumn::InstructorId.eq(instructor_id));
        }

        if let Some(student_id) = student_id {
            select = select.filter(AssignmentColumn::StudentId.eq(student_id));
        }

        let assignments = select
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询窗口分配失败: {e}")))?;

        let total_assignments = assignments.len() as i64;
        let completed_assignments = assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Completed.to_string())
            .count() as i64;

        let completion_rate = if total_assignments > 0 {
            completed_assignments as f64 / total_assignments as f64 * 100.0
        } else {
            0.0
        };

        // 窗口内已结束的会话，限定在被统计的分配范围内
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        let sessions = if assignment_ids.is_empty() {
            Vec::new()
        } else {
            StudySessions::find()
                .filter(SessionColumn::AssignmentId.is_in(assignment_ids))
                .filter(SessionColumn::StartedAt.gte(cutoff))
                .filter(SessionColumn::EndedAt.is_not_null())
                .all(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("查询窗口会话失败: {e}"))
                })?
        };

        let total_sessions = sessions.len() as i64;
        let total_minutes: i64 = sessions
            .iter()
            .filter_map(|s| s.duration_minutes)
            .map(i64::from)
            .sum();

        let average_session_minutes = if total_sessions > 0 {
            total_minutes as f64 / total_sessions as f64
        } else {
            0.0
        };

        Ok(LearningAnalytics {
            period_days: days,
            total_assignments,
            completed_assignments,
            completion_rate,
            total_sessions,
            average_session_minutes,
            engagement_score: LearningAnalytics::engagement_score(
                completion_rate,
                average_session_minutes,
            ),
        })
    }

    /// 学生会话统计，含连续学习天数
    pub async fn student_session_stats_impl(
        &self,
        student_id: i64,
    ) -> Result<StudentSessionStats> {
        let sessions = StudySessions::find()
            .filter(SessionColumn::StudentId.eq(student_id))
            .filter(SessionColumn::EndedAt.is_not_null())
            .order_by_desc(SessionColumn::StartedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询学生会话失败: {e}")))?;

        let total_sessions = sessions.len() as i64;
        let total_study_time_minutes: i64 = sessions
            .iter()
            .filter_map(|s| s.duration_minutes)
            .map(i64::from)
            .sum();

        let average_session_minutes = if total_sessions > 0 {
            total_study_time_minutes as f64 / total_sessions as f64
        } else {
            0.0
        };

        // 连续学习天数：从最近一次会话日期往回数连续有会话的日期
        let days: BTreeSet<i64> = sessions
            .iter()
            .filter_map(|s| DateTime::<Utc>::from_timestamp(s.started_at, 0))
            .map(|dt| dt.date_naive().num_days_from_ce() as i64)
            .collect();

        let study_streak_days = match days.iter().next_back() {
            Some(&latest) => {
                let mut streak = 1i64;
                let mut cursor = latest - 1;
                while days.contains(&cursor) {
                    streak += 1;
                    cursor -= 1;
                }
                streak
            }
            None => 0,
        };

        Ok(StudentSessionStats {
            student_id,
            total_sessions,
            total_study_time_minutes,
            average_session_minutes,
            study_streak_days,
        })
    }
}
