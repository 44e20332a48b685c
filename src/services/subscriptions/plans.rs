use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SubscriptionService, internal_error};
use crate::models::subscriptions::requests::{CreatePlanRequest, UpdatePlanRequest};
use crate::models::{ApiResponse, ErrorCode, OkResponse};

fn plan_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::PlanNotFound,
        "Subscription plan not found",
    ))
}

/// 套餐名非空、价格与上限非负
pub(crate) fn validate_plan_fields(
    name: Option<&str>,
    price: Option<f64>,
    caps: [Option<i32>; 3],
) -> Result<(), &'static str> {
    if let Some(name) = name
        && name.trim().is_empty()
    {
        return Err("Plan name cannot be empty");
    }
    if let Some(price) = price
        && (!price.is_finite() || price < 0.0)
    {
        return Err("Plan price must be a non-negative number");
    }
    if caps.iter().flatten().any(|cap| *cap < 0) {
        return Err("Plan limits cannot be negative");
    }
    Ok(())
}

pub async fn list_plans(
    service: &SubscriptionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_active_plans().await {
        Ok(plans) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            plans,
            "Plans retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list plans: {e}"))),
    }
}

pub async fn get_plan(
    service: &SubscriptionService,
    plan_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_plan_by_id(plan_id).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            plan,
            "Plan retrieved successfully",
        ))),
        Ok(None) => Ok(plan_not_found()),
        Err(e) => Ok(internal_error(format!("Failed to get plan: {e}"))),
    }
}

pub async fn create_plan(
    service: &SubscriptionService,
    plan_data: CreatePlanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_plan_fields(
        Some(&plan_data.name),
        Some(plan_data.price),
        [
            plan_data.max_students,
            plan_data.max_teachers,
            plan_data.max_courses,
        ],
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let storage = service.get_storage(request);
    match storage.create_plan(plan_data).await {
        Ok(plan) => {
            info!("Subscription plan {} created: {}", plan.id, plan.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                plan,
                "Plan created successfully",
            )))
        }
        Err(e) => Ok(internal_error(format!("Failed to create plan: {e}"))),
    }
}

pub async fn update_plan(
    service: &SubscriptionService,
    plan_id: i64,
    update_data: UpdatePlanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_plan_fields(
        update_data.name.as_deref(),
        update_data.price,
        [
            update_data.max_students,
            update_data.max_teachers,
            update_data.max_courses,
        ],
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let storage = service.get_storage(request);
    match storage.update_plan(plan_id, update_data).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            plan,
            "Plan updated successfully",
        ))),
        Ok(None) => Ok(plan_not_found()),
        Err(e) => Ok(internal_error(format!("Failed to update plan: {e}"))),
    }
}

/// 软删除：仅标记为停用
pub async fn delete_plan(
    service: &SubscriptionService,
    plan_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.deactivate_plan(plan_id).await {
        Ok(true) => {
            info!("Subscription plan {} deactivated", plan_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                OkResponse::ok(),
                "Plan deleted successfully",
            )))
        }
        Ok(false) => Ok(plan_not_found()),
        Err(e) => Ok(internal_error(format!("Failed to delete plan: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plan_fields() {
        assert!(validate_plan_fields(Some("Starter"), Some(199.0), [Some(50), None, None]).is_ok());
        assert!(validate_plan_fields(None, None, [None; 3]).is_ok());
        assert!(validate_plan_fields(Some("  "), Some(10.0), [None; 3]).is_err());
        assert!(validate_plan_fields(Some("Pro"), Some(-1.0), [None; 3]).is_err());
        assert!(validate_plan_fields(Some("Pro"), Some(f64::NAN), [None; 3]).is_err());
        assert!(validate_plan_fields(None, None, [None, Some(-5), None]).is_err());
    }
}
