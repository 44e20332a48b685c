use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::BillingInterval;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct CreatePlanRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub billing_interval: BillingInterval,
    #[serde(default)]
    pub features: Vec<String>,
    pub max_students: Option<i32>,
    pub max_teachers: Option<i32>,
    pub max_courses: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub billing_interval: Option<BillingInterval>,
    pub features: Option<Vec<String>>,
    pub max_students: Option<i32>,
    pub max_teachers: Option<i32>,
    pub max_courses: Option<i32>,
    pub is_active: Option<bool>,
}

// admin_id 始终取当前登录管理员
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct CreateSubscriptionRequest {
    pub plan_id: i64,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub auto_renew: Option<bool>,
    // Stripe 侧的订阅与首张账单 ID，webhook 依此回写状态
    pub stripe_subscription_id: Option<String>,
    pub stripe_invoice_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct UpdateSubscriptionRequest {
    pub plan_id: Option<i64>,
    pub status: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub auto_renew: Option<bool>,
    pub stripe_subscription_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct CreateInvoiceRequest {
    pub subscription_id: i64,
    pub amount: f64,
    pub status: Option<String>,
    pub billing_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub invoice_number: Option<String>, // 缺省时自动生成
    pub stripe_invoice_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct UpdateInvoiceRequest {
    pub status: Option<String>,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub stripe_invoice_id: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct RecordMetricRequest {
    pub admin_id: Option<i64>,
    pub metric_name: String,
    pub metric_value: i64,
}
