use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Local;
use tracing::error;

use super::PaymentService;
use super::receipt::{issue_receipt_or_keep, needs_receipt};
use crate::models::payments::entities::PAYMENT_STATUS_PAID;
use crate::models::payments::requests::CreatePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::NewPayment;

pub async fn create_payment(
    service: &PaymentService,
    payment_data: CreatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(payment_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found for payment",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    }

    let new_payment = NewPayment {
        student_id: payment_data.student_id,
        amount: payment_data.amount,
        date: payment_data
            .date
            .unwrap_or_else(|| Local::now().date_naive()),
        method: payment_data.method,
        status: payment_data
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| PAYMENT_STATUS_PAID.to_string()),
    };

    let payment = match storage.create_payment(new_payment).await {
        Ok(payment) => payment,
        Err(e) => {
            error!("Payment creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Payment creation failed: {e}"),
                )),
            );
        }
    };

    let payment = if needs_receipt(&payment) {
        issue_receipt_or_keep(&storage, payment).await
    } else {
        payment
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(
        payment,
        "Payment created successfully",
    )))
}
