//! 课时实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(column_name = "sort_order")]
    pub order: i32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_lesson(self) -> crate::models::content::entities::Lesson {
        use crate::models::content::entities::Lesson;
        use chrono::{DateTime, Utc};

        Lesson {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            content: self.content,
            order: self.order,
            image_url: self.image_url,
            video_url: self.video_url,
            duration_minutes: self.duration_minutes,
            is_active: self.is_active,
            is_published: self.is_published,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
