use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Subscription, SubscriptionInvoice};

/// 支付网关返回的支付意图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: Option<String>,
    pub amount: i64, // 最小货币单位
    pub currency: String,
    pub status: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionCreatedResponse {
    pub subscription: Subscription,
    pub invoice: SubscriptionInvoice,
    pub payment_intent: Option<PaymentIntent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct ResourceUsage {
    pub used: i64,
    pub limit: Option<i32>,
    pub allowed: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct UsageOverview {
    pub subscription_id: Option<i64>,
    pub plan_name: Option<String>,
    pub students: ResourceUsage,
    pub teachers: ResourceUsage,
    pub courses: ResourceUsage,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct WebhookAck {
    pub ok: bool,
    pub event_type: String,
}
