use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    EndSessionRequest, StartSessionRequest, UpdateSessionRequest,
};
use crate::models::common::PaginationQuery;
use crate::services::SessionService;
use crate::utils::{SafeAssignmentIdI64, SafeSessionIdI64, SafeStudentIdI64};

// 懒加载的全局 SessionService 实例
static SESSION_SERVICE: Lazy<SessionService> = Lazy::new(SessionService::new_lazy);

pub async fn start_session(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    session_data: web::Json<StartSessionRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .start_session(assignment_id.0, session_data.into_inner(), &req)
        .await
}

pub async fn get_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE.get_session(session_id.0, &req).await
}

pub async fn update_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    update_data: web::Json<UpdateSessionRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .update_session(session_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn end_session(
    req: HttpRequest,
    session_id: SafeSessionIdI64,
    end_data: web::Json<EndSessionRequest>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .end_session(session_id.0, end_data.into_inner(), &req)
        .await
}

pub async fn list_assignment_sessions(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .list_assignment_sessions(assignment_id.0, query.into_inner(), &req)
        .await
}

pub async fn list_student_sessions(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SESSION_SERVICE
        .list_student_sessions(student_id.0, query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sessions")
            .wrap(middlewares::RequireRemoteUser)
            .route(
                "/assignments/{assignment_id}/start",
                web::post().to(start_session),
            )
            .route(
                "/assignments/{assignment_id}",
                web::get().to(list_assignment_sessions),
            )
            .route(
                "/students/{student_id}",
                web::get().to(list_student_sessions),
            )
            .route("/{session_id}", web::get().to(get_session))
            .route("/{session_id}/progress", web::put().to(update_session))
            .route("/{session_id}/end", web::post().to(end_session)),
    );
}
