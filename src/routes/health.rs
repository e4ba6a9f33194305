use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::HealthService;

// 懒加载的全局 HealthService 实例
static HEALTH_SERVICE: Lazy<HealthService> = Lazy::new(HealthService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.health(&request).await
}

pub async fn gateway_health(request: HttpRequest) -> ActixResult<HttpResponse> {
    HEALTH_SERVICE.gateway_health(&request).await
}

// 配置路由（各服务自身的健康端点，公开）
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

// 配置路由（网关的聚合健康端点，公开）
pub fn configure_gateway_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(gateway_health));
}
