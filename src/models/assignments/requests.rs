use super::entities::{AssignmentStatus, ContentType};
use crate::models::common::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建分配请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub student_id: i64,
    pub content_type: ContentType,
    pub content_id: String,
    pub content_title: Option<String>,
    pub supporting_decks: Option<Vec<String>>,
    pub supporting_deck_titles: Option<Vec<String>>,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-03-01T12:00:00Z"
}

/// 更新分配请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<AssignmentStatus>,
}

/// 分配列表查询参数（HTTP 请求）
///
/// student_id / instructor_id 会被 utils::access 按调用者身份改写。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub student_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub content_type: Option<ContentType>,
    pub status: Option<AssignmentStatus>,
    pub due_before: Option<DateTime<Utc>>,
    pub due_after: Option<DateTime<Utc>>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub content_type: Option<ContentType>,
    pub status: Option<AssignmentStatus>,
    pub due_before: Option<DateTime<Utc>>,
    pub due_after: Option<DateTime<Utc>>,
}

/// 进度更新请求，百分比由 completed/total 重新计算
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateProgressRequest {
    pub total_items: Option<i32>,
    pub completed_items: Option<i32>,
    pub progress_details: Option<serde_json::Value>,
}

/// 开始会话请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StartSessionRequest {
    pub session_notes: Option<String>,
}

/// 会话进度更新请求，仅对活跃会话生效
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateSessionRequest {
    pub items_studied: Option<i32>,
    pub items_completed: Option<i32>,
    pub session_notes: Option<String>,
    pub items_details: Option<serde_json::Value>,
}

/// 结束会话请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct EndSessionRequest {
    pub items_studied: Option<i32>,
    pub items_completed: Option<i32>,
    pub session_notes: Option<String>,
}

/// 学习分析查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct LearningAnalyticsParams {
    pub instructor_id: Option<i64>,
    pub student_id: Option<i64>,
    /// 统计窗口（天），默认 30
    pub days: Option<i64>,
}
