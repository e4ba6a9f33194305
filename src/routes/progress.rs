use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::UpdateProgressRequest;
use crate::services::ProgressService;
use crate::utils::{SafeAssignmentIdI64, SafeStudentIdI64};

// 懒加载的全局 ProgressService 实例
static PROGRESS_SERVICE: Lazy<ProgressService> = Lazy::new(ProgressService::new_lazy);

pub async fn get_progress(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.get_progress(assignment_id.0, &req).await
}

pub async fn update_progress(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    update_data: web::Json<UpdateProgressRequest>,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .update_progress(assignment_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn complete_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE
        .complete_assignment(assignment_id.0, &req)
        .await
}

pub async fn student_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    PROGRESS_SERVICE.student_summary(student_id.0, &req).await
}

// 配置路由
//
// 角色裁决在服务层按分配归属做，这里只要求已认证身份。
pub fn configure_progress_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/progress")
            .wrap(middlewares::RequireRemoteUser)
            .route("/assignments/{assignment_id}", web::get().to(get_progress))
            .route(
                "/assignments/{assignment_id}",
                web::put().to(update_progress),
            )
            .route(
                "/assignments/{assignment_id}/complete",
                web::post().to(complete_assignment),
            )
            .route(
                "/students/{student_id}/summary",
                web::get().to(student_summary),
            ),
    );
}
