use super::entities::Difficulty;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

/// 创建课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
}

/// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

/// 创建课时请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreateLessonRequest {
    pub course_id: String,
    pub title: String,
    pub content: Option<String>,
    pub order: i32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub is_published: bool,
}

/// 更新课时请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order: Option<i32>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

/// 创建卡组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreateDeckRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// 更新卡组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdateDeckRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

/// 创建抽认卡请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CreateFlashcardRequest {
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub order: i32,
    pub difficulty: Option<Difficulty>,
    pub wordclass: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
}

/// 更新抽认卡请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct UpdateFlashcardRequest {
    pub front: Option<String>,
    pub back: Option<String>,
    pub order: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub wordclass: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
}

/// 批量重排请求条目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ReorderItem {
    pub id: String,
    pub order: i32,
}

/// 批量重排请求（课时或抽认卡，按父对象范围）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

/// 内容列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ContentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub is_published: Option<bool>,
    pub instructor_id: Option<i64>,
    pub category: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct ContentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub is_published: Option<bool>,
    pub instructor_id: Option<i64>,
    pub category: Option<String>,
    /// 学生可见性过滤：限定为已分配的内容 ID 加已发布内容
    pub visible_ids: Option<Vec<String>>,
}

/// 课时/卡片子列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ChildListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub is_published: Option<bool>,
}

// 用于存储层的子列表查询参数
#[derive(Debug, Clone, Default)]
pub struct ChildListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub is_published: Option<bool>,
}
