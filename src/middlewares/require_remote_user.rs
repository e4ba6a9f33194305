/*!
 * 远程令牌校验中间件（content / assignment 服务）
 *
 * 这两个服务不持有本地验签逻辑，Bearer 令牌通过调用 auth 服务的
 * `/api/v1/auth/me` 校验并换取用户身份。
 *
 * ## 失败策略
 *
 * fail-closed：auth 服务不可达或超时时返回 503，令牌无效返回 401。
 * 未经 auth 服务确认的请求一律不会放行。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::scope("/api/v1/assignments")
 *     .wrap(RequireRemoteUser)
 *     .configure(routes::assignments::configure)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::create_error_response;
use crate::clients::AuthServiceClient;
use crate::errors::LMSystemError;
use crate::models::ErrorCode;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// 请求扩展中保存的原始 Bearer 令牌
///
/// 下游的跨服务调用需要原样转发调用者凭证。
#[derive(Clone)]
pub struct BearerToken(pub String);

#[derive(Clone)]
pub struct RequireRemoteUser;

impl<S, B> Transform<S, ServiceRequest> for RequireRemoteUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRemoteUserMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRemoteUserMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireRemoteUserMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireRemoteUserMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let token = req
                .headers()
                .get(AUTHORIZATION_HEADER)
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.strip_prefix(BEARER_PREFIX))
                .map(str::to_string);

            let Some(token) = token else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Missing or invalid Authorization header",
                    )
                    .map_into_right_body(),
                ));
            };

            let Some(auth_client) = req
                .app_data::<actix_web::web::Data<AuthServiceClient>>()
                .map(|data| data.get_ref().clone())
            else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::InternalServerError,
                        "Auth client not configured",
                    )
                    .map_into_right_body(),
                ));
            };

            match auth_client.validate_bearer(&token).await {
                Ok(user) => {
                    debug!("Remote token validation successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    req.extensions_mut().insert(BearerToken(token));
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(LMSystemError::UpstreamUnavailable(msg)) => {
                    warn!("Token validation unavailable for {}: {}", req.path(), msg);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::SERVICE_UNAVAILABLE,
                            ErrorCode::UpstreamUnavailable,
                            "Authentication service unavailable",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(err) => {
                    info!(
                        "Remote token validation failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Unauthorized: invalid token",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireRemoteUser {
    /// 从请求扩展中提取原始 Bearer 令牌
    pub fn extract_bearer(req: &actix_web::HttpRequest) -> Option<String> {
        req.extensions().get::<BearerToken>().map(|t| t.0.clone())
    }

    /// 从请求扩展中提取经 auth 服务确认的用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<crate::models::users::entities::User> {
        req.extensions()
            .get::<crate::models::users::entities::User>()
            .cloned()
    }
}
