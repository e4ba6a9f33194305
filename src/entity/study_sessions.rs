//! 学习会话实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "study_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub items_studied: i32,
    pub items_completed: i32,
    pub session_progress: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub session_notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub items_details: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_study_session(self) -> crate::models::assignments::entities::StudySession {
        use crate::models::assignments::entities::StudySession;
        use chrono::{DateTime, Utc};

        StudySession {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            started_at: DateTime::<Utc>::from_timestamp(self.started_at, 0).unwrap_or_default(),
            ended_at: self
                .ended_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            duration_minutes: self.duration_minutes,
            items_studied: self.items_studied,
            items_completed: self.items_completed,
            session_progress: self.session_progress,
            session_notes: self.session_notes,
            items_details: self
                .items_details
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
