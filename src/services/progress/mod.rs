pub mod complete;
pub mod get;
pub mod summary;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::UpdateProgressRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::access::can_view_assignment;

pub struct ProgressService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProgressService {
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

    /// 加载分配并按调用者身份做可见性检查，失败时返回现成的响应
    pub(crate) async fn load_visible_assignment(
        &self,
        assignment_id: i64,
        user_id: i64,
        role: UserRole,
        request: &HttpRequest,
    ) -> Result<Assignment, HttpResponse> {
        let storage = self.get_storage(request);

        let assignment = match storage.get_assignment_by_id(assignment_id).await {
            Ok(Some(assignment)) => assignment,
            Ok(None) => {
                return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentNotFound,
                    "Assignment not found",
                )));
            }
            Err(e) => {
                return Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve assignment: {e}"),
                    )),
                );
            }
        };

        if !can_view_assignment(
            role,
            user_id,
            assignment.student_id,
            assignment.instructor_id,
        ) {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::PermissionDenied,
                "You do not have access to this assignment",
            )));
        }

        Ok(assignment)
    }

    // 获取分配进度
    pub async fn get_progress(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_progress(self, assignment_id, request).await
    }

    // 更新进度（百分比重算，分配状态级联）
    pub async fn update_progress(
        &self,
        assignment_id: i64,
        update_data: UpdateProgressRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_progress(self, assignment_id, update_data, request).await
    }

    // 直接标记分配完成
    pub async fn complete_assignment(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        complete::complete_assignment(self, assignment_id, request).await
    }

    // 学生进度汇总
    pub async fn student_summary(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::student_summary(self, student_id, request).await
    }
}

pub(crate) fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub(crate) fn require_user(
    request: &HttpRequest,
) -> Result<crate::models::users::entities::User, HttpResponse> {
    RequireRemoteUser::extract_user(request).ok_or_else(unauthorized_response)
}
