use std::sync::Arc;

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

use crate::config::AppConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段应为已哈希的密文）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 更新用户密码哈希
    async fn set_user_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// 刷新令牌管理方法
    // 持久化刷新令牌
    async fn store_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord>;
    // 查找刷新令牌
    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>>;
    // 吊销单个刷新令牌
    async fn revoke_refresh_token(&self, token: &str) -> Result<bool>;
    // 吊销用户全部刷新令牌，返回吊销数量
    async fn revoke_user_refresh_tokens(&self, user_id: i64) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        course: CreateCourseRequest,
    ) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: &str) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: ContentListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(
        &self,
        course_id: &str,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 软删除课程及其课时
    async fn delete_course(&self, course_id: &str) -> Result<bool>;

    /// 课时管理方法
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, lesson_id: &str) -> Result<Option<Lesson>>;
    async fn list_course_lessons(
        &self,
        course_id: &str,
        query: ChildListQuery,
    ) -> Result<LessonListResponse>;
    async fn update_lesson(
        &self,
        lesson_id: &str,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, lesson_id: &str) -> Result<bool>;
    // 批量重排课程下的课时，返回更新条数
    async fn reorder_lessons(&self, course_id: &str, items: Vec<ReorderItem>) -> Result<i64>;

    /// 卡组管理方法
    async fn create_deck(
        &self,
        instructor_id: i64,
        instructor_name: Option<String>,
        deck: CreateDeckRequest,
    ) -> Result<Deck>;
    async fn get_deck_by_id(&self, deck_id: &str) -> Result<Option<Deck>>;
    async fn list_decks_with_pagination(&self, query: ContentListQuery)
    -> Result<DeckListResponse>;
    async fn update_deck(&self, deck_id: &str, update: UpdateDeckRequest) -> Result<Option<Deck>>;
    // 软删除卡组及其卡片
    async fn delete_deck(&self, deck_id: &str) -> Result<bool>;

    /// 抽认卡管理方法
    async fn create_flashcard(&self, flashcard: CreateFlashcardRequest) -> Result<Flashcard>;
    async fn get_flashcard_by_id(&self, flashcard_id: &str) -> Result<Option<Flashcard>>;
    async fn list_deck_flashcards(
        &self,
        deck_id: &str,
        query: ChildListQuery,
    ) -> Result<FlashcardListResponse>;
    async fn update_flashcard(
        &self,
        flashcard_id: &str,
        update: UpdateFlashcardRequest,
    ) -> Result<Option<Flashcard>>;
    async fn delete_flashcard(&self, flashcard_id: &str) -> Result<bool>;
    // 批量重排卡组下的卡片，返回更新条数
    async fn reorder_flashcards(&self, deck_id: &str, items: Vec<ReorderItem>) -> Result<i64>;

    /// 分配管理方法
    // 创建分配并初始化零进度记录（事务）
    async fn create_assignment(
        &self,
        instructor_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 软删除分配
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 将过期未完成的分配批量置为 overdue，返回更新条数
    async fn mark_overdue_assignments(&self) -> Result<u64>;

    /// 进度管理方法
    async fn get_progress_by_assignment(&self, assignment_id: i64) -> Result<Option<Progress>>;
    // 更新进度并级联分配状态（事务）
    async fn update_progress(
        &self,
        assignment_id: i64,
        update: UpdateProgressRequest,
    ) -> Result<Option<Progress>>;
    // 直接标记分配完成，进度置为 100%
    async fn complete_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 学生进度汇总
    async fn student_progress_summary(&self, student_id: i64) -> Result<StudentProgressSummary>;

    /// 学习会话管理方法
    // 开始会话，同一分配的历史活跃会话会被强制结束
    async fn start_session(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: StartSessionRequest,
    ) -> Result<StudySession>;
    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<StudySession>>;
    async fn get_active_session(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<StudySession>>;
    // 更新活跃会话的进行中指标
    async fn update_session(
        &self,
        session_id: i64,
        update: UpdateSessionRequest,
    ) -> Result<Option<StudySession>>;
    // 结束会话，结算时长并重算进度累计学习时间（事务）
    async fn end_session(
        &self,
        session_id: i64,
        req: EndSessionRequest,
    ) -> Result<Option<StudySession>>;
    async fn list_assignment_sessions(
        &self,
        assignment_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse>;
    async fn list_student_sessions(
        &self,
        student_id: i64,
        pagination: PaginationQuery,
    ) -> Result<SessionListResponse>;

    /// 学习分析方法
    async fn learning_analytics(
        &self,
        instructor_id: Option<i64>,
        student_id: Option<i64>,
        days: i64,
    ) -> Result<LearningAnalytics>;
    async fn student_session_stats(&self, student_id: i64) -> Result<StudentSessionStats>;
}

pub async fn create_storage(config: &AppConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(&config.database).await?;
    Ok(Arc::new(storage))
}
