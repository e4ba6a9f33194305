use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分配内容类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum ContentType {
    Course,
    Deck,
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "course" => Ok(ContentType::Course),
            "deck" => Ok(ContentType::Deck),
            _ => Err(serde::de::Error::custom(format!(
                "无效的内容类型: '{s}'. 支持的类型: course, deck"
            ))),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Course => write!(f, "course"),
            ContentType::Deck => write!(f, "deck"),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course" => Ok(ContentType::Course),
            "deck" => Ok(ContentType::Deck),
            _ => Err(format!("Invalid content type: {s}")),
        }
    }
}

// 分配状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl<'de> Deserialize<'de> for AssignmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<AssignmentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的分配状态: '{s}'. 支持的状态: pending, in_progress, completed, overdue"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "pending"),
            AssignmentStatus::InProgress => write!(f, "in_progress"),
            AssignmentStatus::Completed => write!(f, "completed"),
            AssignmentStatus::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "in_progress" => Ok(AssignmentStatus::InProgress),
            "completed" => Ok(AssignmentStatus::Completed),
            "overdue" => Ok(AssignmentStatus::Overdue),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

/// 课程维度进度（从 content 服务回查，尽力而为）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CourseProgress {
    pub completion_percentage: f64,
    pub completed_lessons: i32,
    pub total_lessons: i32,
}

// 作业分配实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub instructor_id: i64,
    pub student_id: i64,
    pub content_type: ContentType,
    pub content_id: String,
    pub content_title: Option<String>,
    pub supporting_decks: Option<Vec<String>>,
    pub supporting_deck_titles: Option<Vec<String>>,
    pub title: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub status: AssignmentStatus,
    pub is_active: bool,
    /// 课程类分配的进度富化，content 服务不可达时缺省
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_progress: Option<CourseProgress>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学习进度实体，与分配一一对应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Progress {
    pub id: i64,
    pub assignment_id: i64,
    pub total_items: i32,
    pub completed_items: i32,
    pub completion_percentage: f64,
    pub total_study_time_minutes: i32,
    pub sessions_count: i32,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_accessed: Option<chrono::DateTime<chrono::Utc>>,
    pub progress_details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学习会话实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct StudySession {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_minutes: Option<i32>,
    pub items_studied: i32,
    pub items_completed: i32,
    pub session_progress: f64,
    pub session_notes: Option<String>,
    pub items_details: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 完成百分比：completed/total*100，total 为 0 时为 0
pub fn completion_percentage(completed_items: i32, total_items: i32) -> f64 {
    if total_items > 0 {
        f64::from(completed_items) / f64::from(total_items) * 100.0
    } else {
        0.0
    }
}

/// 会话时长（分钟）：四舍五入，至少为 0
pub fn session_duration_minutes(
    started_at: chrono::DateTime<chrono::Utc>,
    ended_at: chrono::DateTime<chrono::Utc>,
) -> i32 {
    let seconds = (ended_at - started_at).num_seconds().max(0);
    ((seconds as f64) / 60.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0.0);
        assert_eq!(completion_percentage(5, 0), 0.0);
        assert_eq!(completion_percentage(5, 10), 50.0);
        assert_eq!(completion_percentage(10, 10), 100.0);
        assert_eq!(completion_percentage(15, 10), 150.0);
    }

    #[test]
    fn test_session_duration_rounds() {
        let start = Utc::now();
        assert_eq!(session_duration_minutes(start, start), 0);
        assert_eq!(
            session_duration_minutes(start, start + Duration::seconds(29)),
            0
        );
        assert_eq!(
            session_duration_minutes(start, start + Duration::seconds(30)),
            1
        );
        assert_eq!(
            session_duration_minutes(start, start + Duration::seconds(150)),
            3
        );
    }

    #[test]
    fn test_session_duration_never_negative() {
        let start = Utc::now();
        assert_eq!(
            session_duration_minutes(start, start - Duration::minutes(5)),
            0
        );
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["pending", "in_progress", "completed", "overdue"] {
            assert_eq!(s.parse::<AssignmentStatus>().unwrap().to_string(), s);
        }
        assert!("done".parse::<AssignmentStatus>().is_err());
    }
}
