use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::{SubscriptionService, current_admin, internal_error};
use crate::models::subscriptions::requests::RecordMetricRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_metrics(
    service: &SubscriptionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_usage_metrics(admin_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Usage metrics retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list usage metrics: {e}"))),
    }
}

pub async fn record_metric(
    service: &SubscriptionService,
    metric_data: RecordMetricRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    // 缺省记到当前管理员名下
    if let Some(target) = metric_data.admin_id
        && target != admin_id
    {
        warn!(
            "Admin {} attempted to record metrics for admin {}",
            admin_id, target
        );
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::MetricForbidden,
            "Not authorized to record metrics for other admins",
        )));
    }

    if metric_data.metric_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Metric name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);
    match storage
        .record_usage_metric(
            admin_id,
            metric_data.metric_name.trim(),
            metric_data.metric_value,
        )
        .await
    {
        Ok(metric) => Ok(HttpResponse::Created().json(ApiResponse::success(
            metric,
            "Usage metric recorded successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to record usage metric: {e}"))),
    }
}
