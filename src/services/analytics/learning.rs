use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnalyticsService;
use crate::middlewares::require_remote_user::RequireRemoteUser;
use crate::models::assignments::requests::LearningAnalyticsParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::access::scope_assignment_filters;

const DEFAULT_WINDOW_DAYS: i64 = 30;

pub async fn learning_analytics(
    service: &AnalyticsService,
    query: LearningAnalyticsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireRemoteUser::extract_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days < 1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "Analytics window must be at least 1 day",
        )));
    }

    // 过滤条件与分配列表同一套身份约束
    let scope = scope_assignment_filters(user.role, user.id, query.student_id, query.instructor_id);

    let storage = service.get_storage(request);

    match storage
        .learning_analytics(scope.instructor_id, scope.student_id, days)
        .await
    {
        Ok(analytics) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            analytics,
            "Learning analytics retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve learning analytics: {e}"),
            )),
        ),
    }
}
