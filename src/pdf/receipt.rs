use std::path::{Path, PathBuf};

use super::{PdfCanvas, output_path};
use crate::errors::Result;
use crate::models::payments::entities::Payment;

pub fn receipt_file_name(payment_id: i64) -> String {
    format!("receipt_{payment_id}.pdf")
}

/// 渲染缴费收据，返回写入的文件路径
pub fn render_receipt(dir: &Path, student_name: &str, payment: &Payment) -> Result<PathBuf> {
    let path = output_path(dir, &receipt_file_name(payment.id))?;

    let mut canvas = PdfCanvas::portrait("Payment Receipt")?;
    canvas.title("Payment Receipt");
    canvas.line_of_text(&format!("Student: {student_name}"), 11.0, false);
    canvas.line_of_text(&format!("Payment ID: {}", payment.id), 11.0, false);
    canvas.line_of_text(&format!("Date: {}", payment.date), 11.0, false);
    canvas.line_of_text(
        &format!("Method: {}", payment.method.as_deref().unwrap_or("-")),
        11.0,
        false,
    );
    canvas.gap(4.0);

    let rows = vec![(
        "Tuition/Payment".to_string(),
        format!("{:.2}", payment.amount),
    )];
    canvas.two_column_table(("Description", "Amount (MAD)"), &rows, (120.0, 40.0));

    canvas.gap(8.0);
    canvas.line_of_text("Signature: ____________________________", 11.0, false);

    canvas.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(receipt_file_name(42), "receipt_42.pdf");
    }

    #[test]
    fn test_render_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let payment = Payment {
            id: 7,
            student_id: 1,
            amount: 1500.0,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            method: Some("cash".to_string()),
            status: "paid".to_string(),
            receipt_path: None,
        };

        let path = render_receipt(dir.path(), "Amina Benali", &payment).unwrap();
        assert_eq!(path, dir.path().join("receipt_7.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
