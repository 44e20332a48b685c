use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use super::receipt::{issue_receipt_or_keep, needs_receipt};
use crate::models::payments::requests::UpdatePaymentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_payment(
    service: &PaymentService,
    payment_id: i64,
    update_data: UpdatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let payment = match storage.update_payment(payment_id, update_data).await {
        Ok(Some(payment)) => payment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Payment update failed: {e}"),
                )),
            );
        }
    };

    // 转为已缴且还没有收据时补生成
    let payment = if needs_receipt(&payment) {
        issue_receipt_or_keep(&storage, payment).await
    } else {
        payment
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        payment,
        "Payment updated successfully",
    )))
}
