use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use super::{SubscriptionService, current_admin, internal_error, subscription_not_found};
use crate::models::subscriptions::entities::{Subscription, SubscriptionPlan};
use crate::models::subscriptions::requests::{
    CreateSubscriptionRequest, UpdateSubscriptionRequest,
};
use crate::models::subscriptions::responses::SubscriptionCreatedResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::random_code::generate_invoice_number;

fn invalid_plan() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::InvalidSubscriptionPlan,
        "Invalid subscription plan",
    ))
}

/// 只接受存在且启用的套餐
async fn active_plan(
    storage: &Arc<dyn Storage>,
    plan_id: i64,
) -> Result<SubscriptionPlan, HttpResponse> {
    match storage.get_plan_by_id(plan_id).await {
        Ok(Some(plan)) if plan.is_active => Ok(plan),
        Ok(_) => Err(invalid_plan()),
        Err(e) => Err(internal_error(format!("Failed to get plan: {e}"))),
    }
}

/// 读取属于当前管理员的订阅
pub(crate) async fn owned_subscription(
    storage: &Arc<dyn Storage>,
    subscription_id: i64,
    admin_id: i64,
) -> Result<Subscription, HttpResponse> {
    match storage.get_subscription_by_id(subscription_id).await {
        Ok(Some(subscription)) if subscription.admin_id == admin_id => Ok(subscription),
        Ok(_) => Err(subscription_not_found()),
        Err(e) => Err(internal_error(format!("Failed to get subscription: {e}"))),
    }
}

pub async fn list_subscriptions(
    service: &SubscriptionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_subscriptions_by_admin(admin_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Subscriptions retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list subscriptions: {e}"))),
    }
}

pub async fn create_subscription(
    service: &SubscriptionService,
    mut subscription_data: CreateSubscriptionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let plan = match active_plan(&storage, subscription_data.plan_id).await {
        Ok(plan) => plan,
        Err(resp) => return Ok(resp),
    };

    let payment_intent = match service.gateway() {
        Some(gateway) => {
            let description = format!("Subscription to {}", plan.name);
            match gateway
                .create_payment_intent(plan.price, &description, admin_id)
                .await
            {
                Ok(intent) => Some(intent),
                Err(e) => {
                    error!("Failed to create payment intent: {}", e);
                    return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                        ErrorCode::PaymentGatewayError,
                        format!("Failed to create payment intent: {e}"),
                    )));
                }
            }
        }
        None => None,
    };

    // 未指定到期日时按计费周期推算
    if subscription_data.end_date.is_none() {
        let start = subscription_data
            .start_date
            .unwrap_or_else(|| Utc::now().date_naive());
        subscription_data.end_date = plan.billing_interval.end_date_from(start);
    }

    let invoice_number = generate_invoice_number();
    match storage
        .create_subscription_with_invoice(admin_id, subscription_data, plan.price, &invoice_number)
        .await
    {
        Ok((subscription, invoice)) => {
            info!(
                "Subscription {} created for admin {} with invoice {}",
                subscription.id, admin_id, invoice.invoice_number
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubscriptionCreatedResponse {
                    subscription,
                    invoice,
                    payment_intent,
                },
                "Subscription created successfully",
            )))
        }
        Err(e) => Ok(internal_error(format!("Failed to create subscription: {e}"))),
    }
}

pub async fn get_subscription(
    service: &SubscriptionService,
    subscription_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match owned_subscription(&storage, subscription_id, admin_id).await {
        Ok(subscription) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subscription,
            "Subscription retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn update_subscription(
    service: &SubscriptionService,
    subscription_id: i64,
    update_data: UpdateSubscriptionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = owned_subscription(&storage, subscription_id, admin_id).await {
        return Ok(resp);
    }
    if let Some(plan_id) = update_data.plan_id
        && let Err(resp) = active_plan(&storage, plan_id).await
    {
        return Ok(resp);
    }

    match storage
        .update_subscription(subscription_id, update_data)
        .await
    {
        Ok(Some(subscription)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subscription,
            "Subscription updated successfully",
        ))),
        Ok(None) => Ok(subscription_not_found()),
        Err(e) => Ok(internal_error(format!("Failed to update subscription: {e}"))),
    }
}
