use actix_web::{HttpRequest, HttpResponse, error};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理器
///
/// 解析失败统一返回 400 与标准响应包，不向客户端透出反序列化细节之外的信息。
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let message = match &err {
        error::JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        error::JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {e}"),
        error::JsonPayloadError::OverflowKnownLength { length, limit } => {
            format!("Payload too large: {length} > {limit}")
        }
        other => format!("Invalid request body: {other}"),
    };

    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    error::InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    error::InternalError::from_response(err, response).into()
}
