use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::warn;

use super::SystemService;
use crate::models::ApiResponse;
use crate::models::system::responses::HealthResponse;

pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            HealthResponse::healthy(),
            "Service is healthy",
        ))),
        Err(e) => {
            warn!("Health check failed: {}", e);
            Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
                crate::models::ErrorCode::ServiceUnavailable,
                HealthResponse::unhealthy(e.to_string()),
                "Service is unhealthy",
            )))
        }
    }
}
