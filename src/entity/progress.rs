//! 学习进度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub assignment_id: i64,
    pub total_items: i32,
    pub completed_items: i32,
    pub completion_percentage: f64,
    pub total_study_time_minutes: i32,
    pub sessions_count: i32,
    pub started_at: Option<i64>,
    pub last_accessed: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub progress_details: Option<String>,
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
    pub fn into_progress(self) -> crate::models::assignments::entities::Progress {
        use crate::models::assignments::entities::Progress;
        use chrono::{DateTime, Utc};

        Progress {
            id: self.id,
            assignment_id: self.assignment_id,
            total_items: self.total_items,
            completed_items: self.completed_items,
            completion_percentage: self.completion_percentage,
            total_study_time_minutes: self.total_study_time_minutes,
            sessions_count: self.sessions_count,
            started_at: self
                .started_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            last_accessed: self
                .last_accessed
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            progress_details: self
                .progress_details
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
