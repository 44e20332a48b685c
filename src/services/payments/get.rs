use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::config::AppConfig;
use crate::models::payments::entities::ReceiptPathResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_payment(
    service: &PaymentService,
    payment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_payment_by_id(payment_id).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payment,
            "Payment retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PaymentNotFound,
            "Payment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get payment: {e}"),
            )),
        ),
    }
}

// 收据公开访问路径
pub async fn get_receipt(
    service: &PaymentService,
    payment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let payment = match storage.get_payment_by_id(payment_id).await {
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
                    format!("Failed to get payment: {e}"),
                )),
            );
        }
    };

    let url = payment
        .receipt_path
        .as_deref()
        .and_then(|path| AppConfig::get().storage.public_url(path));

    match url {
        Some(path) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReceiptPathResponse { path },
            "Receipt retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ReceiptNotFound,
            "Receipt not found",
        ))),
    }
}
