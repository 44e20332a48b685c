use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{SubscriptionService, internal_error};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::subscriptions::responses::WebhookAck;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::payment_gateway::{WebhookUpdate, plan_webhook_updates, verify_signature};
use crate::storage::Storage;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// 应用事件对应的状态变更，返回实际命中的行数
pub(crate) async fn apply_updates(
    storage: &Arc<dyn Storage>,
    updates: &[WebhookUpdate],
) -> Result<usize> {
    let today = Utc::now().date_naive();
    let mut applied = 0;
    for update in updates {
        let hit = match update {
            WebhookUpdate::Invoice {
                stripe_invoice_id,
                status,
                mark_paid,
            } => {
                let paid_date = mark_paid.then_some(today);
                storage
                    .set_invoice_status_by_stripe_id(stripe_invoice_id, status, paid_date)
                    .await?
            }
            WebhookUpdate::Subscription {
                stripe_subscription_id,
                status,
            } => {
                storage
                    .set_subscription_status_by_stripe_id(stripe_subscription_id, status)
                    .await?
            }
        };
        if hit {
            applied += 1;
        } else {
            debug!("Webhook update matched no rows: {:?}", update);
        }
    }
    Ok(applied)
}

pub async fn handle_webhook(
    service: &SubscriptionService,
    payload: web::Bytes,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(signature) = request
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::WebhookSignatureMissing,
            "Missing Stripe signature",
        )));
    };

    let config = &AppConfig::get().payment;
    if config.stripe_webhook_secret.is_empty() {
        warn!("Webhook received but no webhook secret is configured");
        return Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
            ErrorCode::ServiceUnavailable,
            "Webhook secret is not configured",
        )));
    }

    if let Err(e) = verify_signature(
        &config.stripe_webhook_secret,
        signature,
        &payload,
        Utc::now().timestamp(),
        config.webhook_tolerance,
    ) {
        warn!("Rejected webhook: {}", e);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::WebhookSignatureInvalid,
            "Invalid Stripe signature",
        )));
    }

    let event: Value = match serde_json::from_slice(&payload) {
        Ok(event) => event,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid webhook payload: {e}"),
            )));
        }
    };
    let event_type = event
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let updates = plan_webhook_updates(&event);
    let storage = service.get_storage(request);
    match apply_updates(&storage, &updates).await {
        Ok(applied) => {
            info!("Webhook {} handled, {} rows updated", event_type, applied);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                WebhookAck {
                    ok: true,
                    event_type,
                },
                "Webhook processed successfully",
            )))
        }
        Err(e) => Ok(internal_error(format!("Failed to process webhook: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscriptions::entities::{
        BillingInterval, INVOICE_STATUS_PAID, SUBSCRIPTION_STATUS_ACTIVE,
        SUBSCRIPTION_STATUS_CANCELLED,
    };
    use crate::models::subscriptions::requests::{
        CreatePlanRequest, CreateSubscriptionRequest, UpdateSubscriptionRequest,
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use serde_json::json;

    async fn setup(
        stripe_subscription_id: Option<&str>,
        stripe_invoice_id: Option<&str>,
    ) -> (Arc<dyn Storage>, i64, i64) {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let admin = storage.create_admin("owner", "hash").await.unwrap();
        let plan = storage
            .create_plan(CreatePlanRequest {
                name: "Pro".to_string(),
                description: None,
                price: 499.0,
                billing_interval: BillingInterval::Yearly,
                features: vec![],
                max_students: None,
                max_teachers: None,
                max_courses: None,
                is_active: None,
            })
            .await
            .unwrap();
        let (subscription, invoice) = storage
            .create_subscription_with_invoice(
                admin.id,
                CreateSubscriptionRequest {
                    plan_id: plan.id,
                    status: None,
                    start_date: None,
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: stripe_subscription_id.map(str::to_string),
                    stripe_invoice_id: stripe_invoice_id.map(str::to_string),
                },
                499.0,
                "INV-ABCDEF12",
            )
            .await
            .unwrap();
        (storage, subscription.id, invoice.id)
    }

    #[tokio::test]
    async fn test_invoice_paid_activates_linked_rows() {
        let (storage, subscription_id, invoice_id) = setup(Some("sub_1"), Some("in_1")).await;

        let event = json!({
            "type": "invoice.paid",
            "data": {"object": {"id": "in_1", "subscription": "sub_1"}}
        });
        let applied = apply_updates(&storage, &plan_webhook_updates(&event))
            .await
            .unwrap();
        assert_eq!(applied, 2);

        let subscription = storage
            .get_subscription_by_id(subscription_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subscription.status, SUBSCRIPTION_STATUS_ACTIVE);
        let invoice = storage.get_invoice_by_id(invoice_id).await.unwrap().unwrap();
        assert_eq!(invoice.status, INVOICE_STATUS_PAID);
        assert_eq!(invoice.paid_date, Some(Utc::now().date_naive()));
    }

    #[tokio::test]
    async fn test_stripe_id_linked_on_update() {
        let (storage, subscription_id, _) = setup(None, None).await;
        storage
            .update_subscription(
                subscription_id,
                UpdateSubscriptionRequest {
                    plan_id: None,
                    status: None,
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: Some("sub_late".to_string()),
                },
            )
            .await
            .unwrap();

        let event = json!({
            "type": "customer.subscription.deleted",
            "data": {"object": {"id": "sub_late"}}
        });
        let applied = apply_updates(&storage, &plan_webhook_updates(&event))
            .await
            .unwrap();
        assert_eq!(applied, 1);
        let subscription = storage
            .get_subscription_by_id(subscription_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subscription.status, SUBSCRIPTION_STATUS_CANCELLED);
    }

    #[tokio::test]
    async fn test_apply_updates_without_matches() {
        let (storage, subscription_id, invoice_id) = setup(None, None).await;

        // 本地记录没有 Stripe ID，事件不应命中任何行
        let event = json!({
            "type": "invoice.paid",
            "data": {"object": {"id": "in_unknown", "subscription": "sub_unknown"}}
        });
        let applied = apply_updates(&storage, &plan_webhook_updates(&event))
            .await
            .unwrap();
        assert_eq!(applied, 0);

        let unchanged = storage
            .get_subscription_by_id(subscription_id)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(unchanged.status, SUBSCRIPTION_STATUS_ACTIVE);
        let invoice = storage.get_invoice_by_id(invoice_id).await.unwrap().unwrap();
        assert_ne!(invoice.status, INVOICE_STATUS_PAID);
    }
}
