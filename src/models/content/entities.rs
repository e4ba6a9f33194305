use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 抽认卡难度
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(serde::de::Error::custom(format!(
                "无效的难度: '{s}'. 支持的难度: easy, medium, hard"
            ))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    /// 创建时从 auth 服务回填的讲师名缓存
    pub instructor_name: Option<String>,
    /// 活跃课时数，由存储层在课时增删时重新统计
    pub total_lessons: i32,
    pub estimated_duration_minutes: Option<i32>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课时实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub content: Option<String>,
    pub order: i32,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 卡组实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: i64,
    pub instructor_name: Option<String>,
    /// 活跃卡片数，由存储层在卡片增删时重新统计
    pub total_flashcards: i32,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub is_published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 抽认卡实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct Flashcard {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub order: i32,
    pub difficulty: Option<Difficulty>,
    pub wordclass: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
