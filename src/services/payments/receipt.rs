//! 缴费收据生成

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{EduManageError, Result};
use crate::models::payments::entities::Payment;
use crate::pdf::receipt::render_receipt;
use crate::storage::Storage;

/// 渲染收据并写回 receipt_path
pub async fn issue_receipt(storage: &Arc<dyn Storage>, mut payment: Payment) -> Result<Payment> {
    let student_name = storage
        .get_student_by_id(payment.student_id)
        .await?
        .map(|s| s.full_name)
        .unwrap_or_else(|| format!("#{}", payment.student_id));

    let dir = AppConfig::get().storage.receipts_path();
    let snapshot = payment.clone();
    let path = actix_web::web::block(move || render_receipt(&dir, &student_name, &snapshot))
        .await
        .map_err(|e| EduManageError::document_render(format!("Receipt task failed: {e}")))??;

    let receipt_path = path.to_string_lossy().into_owned();
    storage.set_payment_receipt(payment.id, &receipt_path).await?;
    info!("Receipt generated for payment {}: {}", payment.id, receipt_path);

    payment.receipt_path = Some(receipt_path);
    Ok(payment)
}

/// 生成失败不影响缴费记录本身
pub async fn issue_receipt_or_keep(storage: &Arc<dyn Storage>, payment: Payment) -> Payment {
    match issue_receipt(storage, payment.clone()).await {
        Ok(updated) => updated,
        Err(e) => {
            warn!("Failed to generate receipt for payment {}: {}", payment.id, e);
            payment
        }
    }
}

/// 新缴费或状态转为已缴且尚无收据时才生成
pub fn needs_receipt(payment: &Payment) -> bool {
    payment.is_paid() && payment.receipt_path.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payment(status: &str, receipt_path: Option<&str>) -> Payment {
        Payment {
            id: 1,
            student_id: 1,
            amount: 1500.0,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            method: Some("cash".to_string()),
            status: status.to_string(),
            receipt_path: receipt_path.map(str::to_string),
        }
    }

    #[test]
    fn test_needs_receipt() {
        assert!(needs_receipt(&payment("paid", None)));
        assert!(needs_receipt(&payment("PAID", None)));
        assert!(!needs_receipt(&payment("unpaid", None)));
        assert!(!needs_receipt(&payment("paid", Some("storage/receipts/receipt_1.pdf"))));
    }
}
