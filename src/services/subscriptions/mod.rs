pub mod invoices;
pub mod manage;
pub mod metrics;
pub mod overview;
pub mod plans;
pub mod webhook;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::subscriptions::requests::{
    CreateInvoiceRequest, CreatePlanRequest, CreateSubscriptionRequest, RecordMetricRequest,
    UpdateInvoiceRequest, UpdatePlanRequest, UpdateSubscriptionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::payment_gateway::{PaymentGateway, StripeGateway};
use crate::storage::Storage;

pub struct SubscriptionService {
    storage: Option<Arc<dyn Storage>>,
    gateway: Option<Arc<dyn PaymentGateway>>,
}

impl SubscriptionService {
    pub fn new_lazy() -> Self {
        let gateway = StripeGateway::from_config().map(|g| Arc::new(g) as Arc<dyn PaymentGateway>);
        Self {
            storage: None,
            gateway,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn gateway(&self) -> Option<&Arc<dyn PaymentGateway>> {
        self.gateway.as_ref()
    }

    // 套餐
    pub async fn list_plans(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        plans::list_plans(self, request).await
    }

    pub async fn get_plan(&self, plan_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        plans::get_plan(self, plan_id, request).await
    }

    pub async fn create_plan(
        &self,
        plan_data: CreatePlanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        plans::create_plan(self, plan_data, request).await
    }

    pub async fn update_plan(
        &self,
        plan_id: i64,
        update_data: UpdatePlanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        plans::update_plan(self, plan_id, update_data, request).await
    }

    pub async fn delete_plan(
        &self,
        plan_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        plans::delete_plan(self, plan_id, request).await
    }

    // 订阅
    pub async fn list_subscriptions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::list_subscriptions(self, request).await
    }

    pub async fn create_subscription(
        &self,
        subscription_data: CreateSubscriptionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_subscription(self, subscription_data, request).await
    }

    pub async fn get_subscription(
        &self,
        subscription_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::get_subscription(self, subscription_id, request).await
    }

    pub async fn update_subscription(
        &self,
        subscription_id: i64,
        update_data: UpdateSubscriptionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_subscription(self, subscription_id, update_data, request).await
    }

    // 账单
    pub async fn list_invoices(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        invoices::list_invoices(self, request).await
    }

    pub async fn create_invoice(
        &self,
        invoice_data: CreateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::create_invoice(self, invoice_data, request).await
    }

    pub async fn get_invoice(
        &self,
        invoice_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::get_invoice(self, invoice_id, request).await
    }

    pub async fn update_invoice(
        &self,
        invoice_id: i64,
        update_data: UpdateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        invoices::update_invoice(self, invoice_id, update_data, request).await
    }

    // 用量
    pub async fn list_metrics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        metrics::list_metrics(self, request).await
    }

    pub async fn record_metric(
        &self,
        metric_data: RecordMetricRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        metrics::record_metric(self, metric_data, request).await
    }

    pub async fn usage(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::usage(self, request).await
    }

    pub async fn handle_webhook(
        &self,
        payload: web::Bytes,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        webhook::handle_webhook(self, payload, request).await
    }
}

/// 当前管理员 ID，缺失时返回 401
pub(crate) fn current_admin(request: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_admin_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing admin id",
        ))
    })
}

pub(crate) fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, message))
}

pub(crate) fn subscription_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::SubscriptionNotFound,
        "Subscription not found",
    ))
}
