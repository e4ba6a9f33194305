use super::entities::{Course, Deck, Flashcard, Lesson};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct DeckListResponse {
    pub items: Vec<Deck>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct FlashcardListResponse {
    pub items: Vec<Flashcard>,
    pub pagination: PaginationInfo,
}

/// 重排结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ReorderResponse {
    pub updated: i64,
}
