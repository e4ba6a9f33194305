use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::LearningAnalyticsParams;
use crate::services::AnalyticsService;
use crate::utils::SafeStudentIdI64;

// 懒加载的全局 AnalyticsService 实例
static ANALYTICS_SERVICE: Lazy<AnalyticsService> = Lazy::new(AnalyticsService::new_lazy);

pub async fn learning_analytics(
    req: HttpRequest,
    query: web::Query<LearningAnalyticsParams>,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .learning_analytics(query.into_inner(), &req)
        .await
}

pub async fn student_session_stats(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ANALYTICS_SERVICE
        .student_session_stats(student_id.0, &req)
        .await
}

// 配置路由
//
// 非管理员的查询范围在服务层被身份约束改写，路由层不再加角色门。
pub fn configure_analytics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/analytics")
            .wrap(middlewares::RequireRemoteUser)
            .route("/learning", web::get().to(learning_analytics))
            .route(
                "/students/{student_id}/sessions",
                web::get().to(student_session_stats),
            ),
    );
}
