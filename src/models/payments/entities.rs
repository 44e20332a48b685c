use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

pub const PAYMENT_STATUS_PAID: &str = "paid";
pub const PAYMENT_STATUS_UNPAID: &str = "unpaid";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: Option<String>, // cash / card / transfer ...
    pub status: String,         // paid / unpaid / pending
    pub receipt_path: Option<String>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        is_paid_status(&self.status)
    }
}

pub fn is_paid_status(status: &str) -> bool {
    status.eq_ignore_ascii_case(PAYMENT_STATUS_PAID)
}

pub type PaymentListResponse = PaginatedResponse<Payment>;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct ReceiptPathResponse {
    pub path: String,
}
