pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod receipt;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{
    CreatePaymentRequest, PaymentListQuery, UpdatePaymentRequest,
};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
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

    pub async fn list_payments(
        &self,
        query: PaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, query, request).await
    }

    // 创建缴费记录，已缴时生成收据
    pub async fn create_payment(
        &self,
        payment_data: CreatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, payment_data, request).await
    }

    pub async fn get_payment(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_payment(self, payment_id, request).await
    }

    pub async fn get_receipt(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_receipt(self, payment_id, request).await
    }

    pub async fn update_payment(
        &self,
        payment_id: i64,
        update_data: UpdatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_payment(self, payment_id, update_data, request).await
    }

    pub async fn delete_payment(
        &self,
        payment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_payment(self, payment_id, request).await
    }
}
