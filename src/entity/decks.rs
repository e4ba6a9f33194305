//! 卡组实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "decks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub instructor_id: i64,
    pub instructor_name: Option<String>,
    pub total_flashcards: i32,
    pub category: Option<String>,
    // JSON 编码的标签数组
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flashcards::Entity")]
    Flashcards,
}

impl Related<super::flashcards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flashcards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_deck(self) -> crate::models::content::entities::Deck {
        use crate::models::content::entities::Deck;
        use chrono::{DateTime, Utc};

        Deck {
            id: self.id,
            title: self.title,
            description: self.description,
            instructor_id: self.instructor_id,
            instructor_name: self.instructor_name,
            total_flashcards: self.total_flashcards,
            category: self.category,
            tags: self
                .tags
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default(),
            is_active: self.is_active,
            is_published: self.is_published,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
