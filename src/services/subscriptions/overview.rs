use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubscriptionService, current_admin, internal_error};
use crate::models::ApiResponse;
use crate::services::usage::usage_overview;

pub async fn usage(
    service: &SubscriptionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match usage_overview(&storage, admin_id).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Usage retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to compute usage: {e}"))),
    }
}
