use super::entities::{Assignment, StudySession};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SessionListResponse {
    pub items: Vec<StudySession>,
    pub pagination: PaginationInfo,
}

/// 学生进度汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentProgressSummary {
    pub student_id: i64,
    pub total_assignments: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
    /// completed/total*100，无分配时为 0
    pub completion_rate: f64,
    /// 已结束会话时长合计（分钟）
    pub total_study_time_minutes: i64,
}

/// 窗口期学习分析
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct LearningAnalytics {
    pub period_days: i64,
    pub total_assignments: i64,
    pub completed_assignments: i64,
    pub completion_rate: f64,
    pub total_sessions: i64,
    pub average_session_minutes: f64,
    /// min(100, completion_rate + avg_study_minutes/60*10)
    pub engagement_score: f64,
}

/// 学生会话统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudentSessionStats {
    pub student_id: i64,
    pub total_sessions: i64,
    pub total_study_time_minutes: i64,
    pub average_session_minutes: f64,
    /// 以最近一次会话日期起算的连续学习天数
    pub study_streak_days: i64,
}

impl LearningAnalytics {
    /// 参与度得分，封顶 100
    pub fn engagement_score(completion_rate: f64, average_session_minutes: f64) -> f64 {
        (completion_rate + average_session_minutes / 60.0 * 10.0).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_score_caps_at_100() {
        assert_eq!(LearningAnalytics::engagement_score(100.0, 600.0), 100.0);
        assert_eq!(LearningAnalytics::engagement_score(0.0, 0.0), 0.0);
        let score = LearningAnalytics::engagement_score(50.0, 30.0);
        assert!((score - 55.0).abs() < f64::EPSILON);
    }
}
