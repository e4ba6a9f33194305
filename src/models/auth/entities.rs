use serde::{Deserialize, Serialize};

// 服务端持久化的刷新令牌记录
//
// 仅在存储层与 auth 服务内部流转，不进入 HTTP 响应。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub is_active: bool,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl RefreshTokenRecord {
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at <= now
    }
}
