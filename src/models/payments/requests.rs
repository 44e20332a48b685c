use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub amount: f64,
    pub date: Option<NaiveDate>, // 缺省为当天
    pub method: Option<String>,
    pub status: Option<String>, // 缺省为 paid
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<String>,
}
