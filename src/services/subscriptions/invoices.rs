use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::manage::owned_subscription;
use super::{SubscriptionService, current_admin, internal_error};
use crate::models::subscriptions::entities::SubscriptionInvoice;
use crate::models::subscriptions::requests::{CreateInvoiceRequest, UpdateInvoiceRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

fn invoice_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::InvoiceNotFound,
        "Invoice not found",
    ))
}

/// 账单通过所属订阅归属到管理员
async fn owned_invoice(
    storage: &Arc<dyn Storage>,
    invoice_id: i64,
    admin_id: i64,
) -> Result<SubscriptionInvoice, HttpResponse> {
    let invoice = match storage.get_invoice_by_id(invoice_id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return Err(invoice_not_found()),
        Err(e) => return Err(internal_error(format!("Failed to get invoice: {e}"))),
    };
    match storage.get_subscription_by_id(invoice.subscription_id).await {
        Ok(Some(subscription)) if subscription.admin_id == admin_id => Ok(invoice),
        Ok(_) => Err(invoice_not_found()),
        Err(e) => Err(internal_error(format!("Failed to get subscription: {e}"))),
    }
}

pub async fn list_invoices(
    service: &SubscriptionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_invoices_by_admin(admin_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Invoices retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list invoices: {e}"))),
    }
}

pub async fn create_invoice(
    service: &SubscriptionService,
    invoice_data: CreateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    if !invoice_data.amount.is_finite() || invoice_data.amount < 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Invoice amount must be a non-negative number",
        )));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = owned_subscription(&storage, invoice_data.subscription_id, admin_id).await {
        return Ok(resp);
    }

    match storage.create_invoice(invoice_data).await {
        Ok(invoice) => {
            info!(
                "Invoice {} created for subscription {}",
                invoice.invoice_number, invoice.subscription_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                invoice,
                "Invoice created successfully",
            )))
        }
        Err(e) => Ok(internal_error(format!("Failed to create invoice: {e}"))),
    }
}

pub async fn get_invoice(
    service: &SubscriptionService,
    invoice_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match owned_invoice(&storage, invoice_id, admin_id).await {
        Ok(invoice) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            invoice,
            "Invoice retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn update_invoice(
    service: &SubscriptionService,
    invoice_id: i64,
    update_data: UpdateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin_id = match current_admin(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = owned_invoice(&storage, invoice_id, admin_id).await {
        return Ok(resp);
    }

    match storage.update_invoice(invoice_id, update_data).await {
        Ok(Some(invoice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            invoice,
            "Invoice updated successfully",
        ))),
        Ok(None) => Ok(invoice_not_found()),
        Err(e) => Ok(internal_error(format!("Failed to update invoice: {e}"))),
    }
}
