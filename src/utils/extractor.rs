//! 路径参数安全提取器
//!
//! 在进入业务处理前完成路径 ID 的解析与取值校验，
//! 失败时直接返回标准响应包的 400。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> error::Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    error::InternalError::from_response(error::ErrorBadRequest(""), response).into()
}

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = error::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok());
                ready(match parsed {
                    Some(id) if id > 0 => Ok($name(id)),
                    _ => Err(bad_request(format!(
                        "Invalid path parameter '{}': expected a positive integer",
                        $param
                    ))),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeUserIdI64, "user_id");
define_safe_i64_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_i64_extractor!(SafeSessionIdI64, "session_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");

/// 内容对象 ID 提取器（字符串主键）
pub struct SafeContentId(pub String);

impl SafeContentId {
    // 与迁移中的 string_len(36) 一致
    const MAX_LEN: usize = 36;
}

impl FromRequest for SafeContentId {
    type Error = error::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("content_id").map(str::to_string);
        ready(match raw {
            Some(id)
                if !id.is_empty()
                    && id.len() <= Self::MAX_LEN
                    && id
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-') =>
            {
                Ok(SafeContentId(id))
            }
            _ => Err(bad_request(
                "Invalid path parameter 'content_id': expected an object id".to_string(),
            )),
        })
    }
}
