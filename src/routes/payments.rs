use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payments::requests::{
    CreatePaymentRequest, PaymentListQuery, UpdatePaymentRequest,
};
use crate::services::PaymentService;
use crate::utils::SafePaymentIdI64;

// 懒加载的全局 PaymentService 实例
static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(query.into_inner(), &req).await
}

pub async fn create_payment(
    req: HttpRequest,
    payment_data: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .create_payment(payment_data.into_inner(), &req)
        .await
}

pub async fn get_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(payment_id.0, &req).await
}

pub async fn get_receipt(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_receipt(payment_id.0, &req).await
}

pub async fn update_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
    update_data: web::Json<UpdatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .update_payment(payment_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.delete_payment(payment_id.0, &req).await
}

// 配置路由
pub fn configure_payments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_payments))
                    .route(web::post().to(create_payment)),
            )
            .route("/{payment_id}/receipt", web::get().to(get_receipt))
            .service(
                web::resource("/{payment_id}")
                    .route(web::get().to(get_payment))
                    .route(web::put().to(update_payment))
                    .route(web::delete().to(delete_payment)),
            ),
    );
}
