use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::clients::HealthClient;
use crate::models::common::{GatewayHealth, HealthStatus, ServiceHealth};
use crate::models::{APP_START_TIME, ApiResponse, ErrorCode};

/// 各 bin 注入的服务标识，健康上报时回显
#[derive(Debug, Clone)]
pub struct ServiceName(pub &'static str);

pub struct HealthService;

impl HealthService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 本服务健康状态
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let service = request
            .app_data::<actix_web::web::Data<ServiceName>>()
            .map(|name| name.0)
            .unwrap_or("lmsystem");

        let status = HealthStatus {
            service: service.to_string(),
            status: "healthy".to_string(),
            uptime_seconds: APP_START_TIME.elapsed().as_secs(),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(status, "Service is healthy")))
    }

    // 网关聚合健康：逐个探测下游，任一失败则整体 degraded
    pub async fn gateway_health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(client) = request
            .app_data::<actix_web::web::Data<HealthClient>>()
            .map(|data| data.get_ref().clone())
        else {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Health client not configured",
                )),
            );
        };

        let services: Vec<ServiceHealth> = client
            .probe_all()
            .await
            .into_iter()
            .map(|(name, healthy)| ServiceHealth { name, healthy })
            .collect();

        let all_healthy = services.iter().all(|s| s.healthy);
        let health = GatewayHealth {
            status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
            uptime_seconds: APP_START_TIME.elapsed().as_secs(),
            services,
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(health, "Gateway health retrieved")))
    }
}
