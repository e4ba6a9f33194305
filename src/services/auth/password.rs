use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

use super::AuthService;

/// 修改密码
///
/// 重新校验当前密码，新密码过策略检查后落库，
/// 随后吊销全部刷新令牌，旧会话一律重新登录。
pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);
    let config = service.get_config(request);

    if !verify_password(&change_request.current_password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }

    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let password_hash = match hash_password(&config.argon2, &change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    if let Err(e) = storage.set_user_password(user.id, &password_hash).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Password change failed: {e}"),
            )),
        );
    }

    // 密码变更后吊销全部刷新令牌
    match storage.revoke_user_refresh_tokens(user.id).await {
        Ok(revoked) => {
            tracing::info!(
                "User {} changed password, {} token(s) revoked",
                user.id,
                revoked
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
        }
        Err(e) => {
            tracing::error!("Failed to revoke tokens after password change: {}", e);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
        }
    }
}
