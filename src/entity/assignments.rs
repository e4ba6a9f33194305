//! 作业分配实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub instructor_id: i64,
    pub student_id: i64,
    pub content_type: String,
    pub content_id: String,
    pub content_title: Option<String>,
    // JSON 编码的辅助卡组 ID / 标题列表
    #[sea_orm(column_type = "Text", nullable)]
    pub supporting_decks: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub supporting_deck_titles: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub instructions: Option<String>,
    pub assigned_at: i64,
    pub due_date: Option<i64>,
    pub completed_at: Option<i64>,
    pub status: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::progress::Entity")]
    Progress,
    #[sea_orm(has_many = "super::study_sessions::Entity")]
    StudySessions,
}

impl Related<super::progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
    }
}

impl Related<super::study_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudySessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn decode_string_list(raw: Option<&str>) -> Option<Vec<String>> {
    raw.and_then(|s| serde_json::from_str(s).ok())
}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentStatus, ContentType};
        use chrono::{DateTime, Utc};

        Assignment {
            id: self.id,
            instructor_id: self.instructor_id,
            student_id: self.student_id,
            content_type: self
                .content_type
                .parse::<ContentType>()
                .unwrap_or(ContentType::Course),
            content_id: self.content_id,
            content_title: self.content_title,
            supporting_decks: decode_string_list(self.supporting_decks.as_deref()),
            supporting_deck_titles: decode_string_list(self.supporting_deck_titles.as_deref()),
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            assigned_at: DateTime::<Utc>::from_timestamp(self.assigned_at, 0).unwrap_or_default(),
            due_date: self
                .due_date
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            completed_at: self
                .completed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            status: self
                .status
                .parse::<AssignmentStatus>()
                .unwrap_or(AssignmentStatus::Pending),
            is_active: self.is_active,
            course_progress: None,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
