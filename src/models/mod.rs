//! 数据模型定义
//!
//! 与 entity 模块的数据库实体分离的业务模型，直接参与 HTTP 序列化。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod content;
pub mod users;

use once_cell::sync::Lazy;
use std::time::Instant;

pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 进程启动时间，用于健康检查的 uptime 上报
pub static APP_START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// 业务错误码
///
/// code 为 0 表示成功，4xxx 为客户端错误，5xxx 为服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 4000,
    Unauthorized = 4010,
    TokenInvalid = 4011,
    TokenExpired = 4012,
    AuthFailed = 4013,
    PermissionDenied = 4030,
    NotFound = 4040,
    UserNotFound = 4041,
    ContentNotFound = 4042,
    AssignmentNotFound = 4043,
    SessionNotFound = 4044,
    Conflict = 4090,
    UserAlreadyExists = 4091,
    ValidationError = 4220,

    InternalServerError = 5000,
    UpstreamUnavailable = 5030,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 4010);
        assert_eq!(ErrorCode::ValidationError as i32, 4220);
        assert_eq!(ErrorCode::UpstreamUnavailable as i32, 5030);
    }
}
