use serde::Serialize;
use ts_rs::TS;

/// 单个服务的健康状态
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
    pub uptime_seconds: u64,
}

/// 网关视角的下游服务健康
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct ServiceHealth {
    pub name: String,
    pub healthy: bool,
}

/// 网关聚合健康视图，任一下游不健康时整体降级为 degraded
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/health.ts")]
pub struct GatewayHealth {
    pub status: String,
    pub uptime_seconds: u64,
    pub services: Vec<ServiceHealth>,
}
