use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::AuthService;

pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let storage = service.get_storage(request);

    // 吊销用户全部刷新令牌，所有设备的会话同时失效
    match storage.revoke_user_refresh_tokens(user.id).await {
        Ok(revoked) => {
            tracing::info!("User {} logged out, {} token(s) revoked", user.id, revoked);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Logout successful")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Logout failed: {e}"),
            )),
        ),
    }
}
