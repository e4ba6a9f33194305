//! 抽认卡实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flashcards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub deck_id: String,
    #[sea_orm(column_type = "Text")]
    pub front: String,
    #[sea_orm(column_type = "Text")]
    pub back: String,
    #[sea_orm(column_name = "sort_order")]
    pub order: i32,
    pub difficulty: Option<String>,
    pub wordclass: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub definition: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub example: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::decks::Entity",
        from = "Column::DeckId",
        to = "super::decks::Column::Id"
    )]
    Deck,
}

impl Related<super::decks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deck.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_flashcard(self) -> crate::models::content::entities::Flashcard {
        use crate::models::content::entities::{Difficulty, Flashcard};
        use chrono::{DateTime, Utc};

        Flashcard {
            id: self.id,
            deck_id: self.deck_id,
            front: self.front,
            back: self.back,
            order: self.order,
            difficulty: self
                .difficulty
                .as_deref()
                .and_then(|s| s.parse::<Difficulty>().ok()),
            wordclass: self.wordclass,
            definition: self.definition,
            example: self.example,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
