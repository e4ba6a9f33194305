pub mod end;
pub mod get;
pub mod list;
pub mod start;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::entities::StudySession;
use crate::models::assignments::requests::{
    EndSessionRequest, StartSessionRequest, UpdateSessionRequest,
};
use crate::models::common::PaginationQuery;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct SessionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SessionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 加载会话，仅会话归属的学生本人或管理员可以操作
    pub(crate) async fn load_owned_session(
        &self,
        session_id: i64,
        user: &User,
        request: &HttpRequest,
    ) -> Result<StudySession, HttpResponse> {
        let storage = self.get_storage(request);

        let session = match storage.get_session_by_id(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::SessionNotFound,
                    "Study session not found",
                )));
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve study session: {e}"),
                    )),
                );
            }
        };

        if user.role != UserRole::Admin && session.student_id != user.id {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "Only the session owner can modify this session",
            )));
        }

        Ok(session)
    }

    // 开始学习会话（同一分配的历史活跃会话会被强制结束）
    pub async fn start_session(
        &self,
        assignment_id: i64,
        session_data: StartSessionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        start::start_session(self, assignment_id, session_data, request).await
    }

    // 获取会话详情
    pub async fn get_session(
        &self,
        session_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_session(self, session_id, request).await
    }

    // 更新活跃会话的进行中指标
    pub async fn update_session(
        &self,
        session_id: i64,
        update_data: UpdateSessionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_session(self, session_id, update_data, request).await
    }

    // 结束会话并结算时长
    pub async fn end_session(
        &self,
        session_id: i64,
        end_data: EndSessionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        end::end_session(self, session_id, end_data, request).await
    }

    // 某个分配下的会话列表
    pub async fn list_assignment_sessions(
        &self,
        assignment_id: i64,
        pagination: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assignment_sessions(self, assignment_id, pagination, request).await
    }

    // 某个学生的会话列表
    pub async fn list_student_sessions(
        &self,
        student_id: i64,
        pagination: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_student_sessions(self, student_id, pagination, request).await
    }
}

pub(crate) fn require_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireRemoteUser::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}
