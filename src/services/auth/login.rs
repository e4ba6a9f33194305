use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config(request);

    // 1. 根据用户名或邮箱获取用户信息
    match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) if user.is_active => {
            // 2. 验证密码
            if !verify_password(&login_request.password, &user.password_hash) {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Username or password is incorrect",
                )));
            }

            // 3. 更新最后登录时间
            let _ = storage.update_last_login(user.id).await;

            // 4. 生成令牌对，remember_me 延长刷新令牌有效期
            let refresh_days = if login_request.remember_me {
                config.jwt.refresh_token_remember_me_expiry
            } else {
                config.jwt.refresh_token_expiry
            };
            let refresh_expiry = chrono::Duration::days(refresh_days);

            let token_pair = match user.generate_token_pair(&config.jwt, Some(refresh_expiry)) {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to generate token",
                        ),
                    ));
                }
            };

            // 5. 服务端持久化刷新令牌，支持吊销与轮换
            let expires_at = chrono::Utc::now() + refresh_expiry;
            if let Err(e) = storage
                .store_refresh_token(user.id, &token_pair.refresh_token, expires_at)
                .await
            {
                tracing::error!("Failed to persist refresh token: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Login failed, unable to persist session",
                    )),
                );
            }

            tracing::info!("User {} logged in successfully", user.username);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                refresh_token: token_pair.refresh_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                user,
                created_at: chrono::Utc::now(),
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        // 账号不存在与密码错误返回同一错误，避免用户名探测
        Ok(_) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}
