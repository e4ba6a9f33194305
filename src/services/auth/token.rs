use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::{requests::RefreshTokenRequest, responses::RefreshTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn unauthorized(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(ErrorCode::Unauthorized, message))
}

/// 刷新令牌轮换
///
/// 令牌随请求体提交，必须能解码为 refresh 类型、未过期、且在存储中
/// 仍处于活跃状态。旧令牌吊销后签发新令牌对，有效期窗口保持不变。
pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: RefreshTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config(request);

    // 1. 验签并确认 token_type == "refresh"
    if let Err(e) = JwtUtils::verify_refresh_token(&config.jwt, &refresh_request.refresh_token) {
        tracing::info!("Refresh token rejected: {}", e);
        return Ok(unauthorized("Login expired or invalid, please login again"));
    }

    // 2. 服务端记录必须存在、活跃且未过期
    let record = match storage.get_refresh_token(&refresh_request.refresh_token).await {
        Ok(Some(record)) => record,
        Ok(None) => return Ok(unauthorized("Login expired or invalid, please login again")),
        Err(e) => {
            tracing::error!("Refresh token lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed",
                )),
            );
        }
    };

    let now = chrono::Utc::now();
    if !record.is_active || record.is_expired(now) {
        return Ok(unauthorized("Login expired or invalid, please login again"));
    }

    // 3. 令牌对应的用户必须仍然活跃
    let user = match storage.get_user_by_id(record.user_id).await {
        Ok(Some(user)) if user.is_active => user,
        Ok(_) => return Ok(unauthorized("Login expired or invalid, please login again")),
        Err(e) => {
            tracing::error!("User lookup failed during token refresh: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed",
                )),
            );
        }
    };

    // 4. 轮换：吊销旧令牌，新令牌沿用剩余有效期窗口
    if let Err(e) = storage
        .revoke_refresh_token(&refresh_request.refresh_token)
        .await
    {
        tracing::error!("Failed to revoke refresh token: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Token refresh failed",
            )),
        );
    }

    let remaining = record.expires_at - now;
    let token_pair = match user.generate_token_pair(&config.jwt, Some(remaining)) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed, unable to generate token",
                )),
            );
        }
    };

    if let Err(e) = storage
        .store_refresh_token(user.id, &token_pair.refresh_token, record.expires_at)
        .await
    {
        tracing::error!("Failed to persist rotated refresh token: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Token refresh failed, unable to persist session",
            )),
        );
    }

    tracing::debug!("Refresh token rotated for user {}", user.id);

    let response = RefreshTokenResponse {
        access_token: token_pair.access_token,
        refresh_token: token_pair.refresh_token,
        expires_in: config.jwt.access_token_expiry * 60,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Token refreshed successfully",
    )))
}
