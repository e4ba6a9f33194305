//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod analytics;
mod assignments;
mod courses;
mod decks;
mod flashcards;
mod lessons;
mod progress;
mod refresh_tokens;
mod sessions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::DatabaseConfig;
use crate::errors::{LMSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LMSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LMSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use chrono::{DateTime, Utc};

use crate::models::{
    assignments::{
        entities::{Assignment, Progress, StudySession},
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, EndSessionRequest, StartSessionRequest,
            UpdateAssignmentRequest, UpdateProgressRequest, UpdateSessionRequest,
        },
        responses::{
            AssignmentListResponse, LearningAnalytics, SessionListResponse, StudentProgressSummary,
            StudentSessionStats,
        },
    },
    auth::entities::RefreshTokenRecord,
    common::PaginationQuery,
    content::{
        entities::{Course, Deck, Flashcard, Lesson},
        requests::{
            ChildListQuery, ContentListQuery, CreateCourseRequest, CreateDeckRequest,
            CreateFlashcardRequest, CreateLessonRequest, ReorderItem, UpdateCourseRequest,
            UpdateDeckRequest, UpdateFlashcardRequest, UpdateLessonRequest,
        },
        responses::{
            CourseListResponse, DeckListResponse, FlashcardListResponse, LessonListResponse,
        },
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn set_user_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.set_user_password_impl(id, password_hash).await
    }

    // 刷新令牌模块
    async fn store_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord> {
        self.store_refresh_token_impl(user_id, token, expires_at)
            .await
    }

    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>> {
        self.get_refresh_token_impl(token).await
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<bool> {
        self.revoke_refresh_token_impl(token).await
    }

    async fn revoke_user_refresh_tokens(&self, user_id: i64) -> Result<u64> {
        self.revoke_user_refresh_tokens_impl(user_id).await
    }

    // 课程模块
    async fn create_course(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        course: CreateCourseRequest,
    ) -> Result<Course> {
        self.create_course_impl(instructor_id, instructor_name, course)
            .await
    }

    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: ContentListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: &str) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 课时模块
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn get_lesson_by_id(&self, lesson_id: &str) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_course_lessons(
        &self,
        course_id: &str,
        query: ChildListQuery,
    ) -> Result<LessonListResponse> {
        self.list_course_lessons_impl(course_id, query).await
    }

    async fn update_lesson(
        &self,
        lesson_id: &str,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(lesson_id, update).await
    }

    async fn delete_lesson(&self, lesson_id: &str) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn reorder_lessons(&self, course_id: &str, items: Vec<ReorderItem>) -> Result<i64> {
        self.reorder_lessons_impl(course_id, items).await
    }

    // 卡组模块
    async fn create_deck(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        deck: CreateDeckRequest,
    ) -> Result<Deck> {
        self.create_deck_impl(instructor_id, instructor_name, deck)
            .await
    }

    async fn get_deck_by_id(&self, deck_id: &str) -> Result<Option<Deck>> {
        self.get_deck_by_id_impl(deck_id).await
    }

    async fn list_decks_with_pagination(
        &self,
        query: ContentListQuery,
    ) -> Result<DeckListResponse> {
        self.list_decks_with_pagination_impl(query).await
    }

    async fn update_deck(&self, deck_id: &str, update: UpdateDeckRequest) -> Result<Option<Deck>> {
        self.update_deck_impl(deck_id, update).await
    }

    async fn delete_deck(&self, deck_id: &str) -> Result<bool> {
        self.delete_deck_impl(deck_id).await
    }

    // 抽认卡模块
    async fn create_flashcard(&self, flashcard: CreateFlashcardRequest) -> Result<Flashcard> {
        self.create_flashcard_impl(flashcard).await
    }

    async fn get_flashcard_by_id(&self, flashcard_id: &str) -> Result<Option<Flashcard>> {
        self.get_flashcard_by_id_impl(flashcard_id).await
    }

    async fn list_deck_flashcards(
        &self,
        deck_id: &str,
        query: ChildListQuery,
    ) -> Result<FlashcardListResponse> {
        self.list_deck_flashcards_impl(deck_id, query).await
    }

    async fn update_flashcard(
        &self,
        flashcard_id: &str,
        update: UpdateFlashcardRequest,
    ) -> Result<Option<Flashcard>> {
        self.update_flashcard_impl(flashcard_id, update).await
    }

    async fn delete_flashcard(&self, flashcard_id: &str) -> Result<bool> {
        self.delete_flashcard_impl(flashcard_id).await
    }

    async fn reorder_flashcards(&self, deck_id: &str, items: Vec<ReorderItem>) -> Result<i64> {
        self.reorder_flashcards_impl(deck_id, items).await
    }

    // 分配模块
    async fn create_assignment(
        &self,
        instructor_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(instructor_id, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn mark_overdue_assignments(&self) -> Result<u64> {
        self.mark_overdue_assignments_impl().await
    }

    // 进度模块
    async fn get_progress_by_assignment(&self, assignment_id: i64) -> Result<Option<Progress>> {
        self.get_progress_by_assignment_impl(assignment_id).await
    }

    async fn update_progress(
        &self,
        assignment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Progress>> {
        self.update_progress_impl(assignment_id, update).await
    }

    async fn complete_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.complete_assignment_impl(assignment_id).await
    }

    async fn student_progress_summary(&self, student_id: i64) -> Result<StudentProgressSummary> {
        self.student_progress_summary_impl(student_id).await
    }

    // 会话模块
    async fn start_session(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: StartSessionRequest,
    ) -> Result<StudySession> {
        self.start_session_impl(assignment_id, student_id, req)
            .await
    }

    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<StudySession>> {
        self.get_session_by_id_impl(session_id).await
    }

    async fn get_active_session(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudySession>> {
        self.get_active_session_impl(assignment_id, student_id)
            .await
    }

    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<StudySession>> {
        self.update_session_impl(session_id, update).await
    }

    async fn end_session(
        &self,
        session_id: i64,
        req: EndSessionRequest,
    ) -> Result<Option<StudySession>> {
        self.end_session_impl(session_id, req).await
    }

    async fn list_assignment_sessions(
        &self,
        assignment_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse> {
        self.list_assignment_sessions_impl(assignment_id, pagination)
            .await
    }

    async fn list_student_sessions(
        &self,
        student_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse> {
        self.list_student_sessions_impl(student_id, pagination)
            .await
    }

    // 分析模块
    async fn learning_analytics(
        &self,
        instructor_id: Option<i64>,
        student_id: Option<i64>,
        days: i64,
    ) -> Result<LearningAnalytics> {
        self.learning_analytics_impl(instructor_id, student_id, days)
            .await
    }

    async fn student_session_stats(&self, student_id: i64) -> Result<StudentSessionStats> {
        self.student_session_stats_impl(student_id).await
    }
}
