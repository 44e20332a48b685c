use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subscriptions::requests::{
    CreateInvoiceRequest, CreatePlanRequest, CreateSubscriptionRequest, RecordMetricRequest,
    UpdateInvoiceRequest, UpdatePlanRequest, UpdateSubscriptionRequest,
};
use crate::services::SubscriptionService;
use crate::utils::{SafeInvoiceIdI64, SafePlanIdI64, SafeSubscriptionIdI64};

// 懒加载的全局 SubscriptionService 实例
static SUBSCRIPTION_SERVICE: Lazy<SubscriptionService> =
    Lazy::new(SubscriptionService::new_lazy);

// 套餐
pub async fn list_plans(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.list_plans(&req).await
}

pub async fn get_plan(req: HttpRequest, plan_id: SafePlanIdI64) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.get_plan(plan_id.0, &req).await
}

pub async fn create_plan(
    req: HttpRequest,
    plan_data: web::Json<CreatePlanRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .create_plan(plan_data.into_inner(), &req)
        .await
}

pub async fn update_plan(
    req: HttpRequest,
    plan_id: SafePlanIdI64,
    update_data: web::Json<UpdatePlanRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .update_plan(plan_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_plan(req: HttpRequest, plan_id: SafePlanIdI64) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.delete_plan(plan_id.0, &req).await
}

// 订阅
pub async fn list_subscriptions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.list_subscriptions(&req).await
}

pub async fn create_subscription(
    req: HttpRequest,
    subscription_data: web::Json<CreateSubscriptionRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .create_subscription(subscription_data.into_inner(), &req)
        .await
}

pub async fn get_subscription(
    req: HttpRequest,
    subscription_id: SafeSubscriptionIdI64,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .get_subscription(subscription_id.0, &req)
        .await
}

pub async fn update_subscription(
    req: HttpRequest,
    subscription_id: SafeSubscriptionIdI64,
    update_data: web::Json<UpdateSubscriptionRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .update_subscription(subscription_id.0, update_data.into_inner(), &req)
        .await
}

// 账单
pub async fn list_invoices(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.list_invoices(&req).await
}

pub async fn create_invoice(
    req: HttpRequest,
    invoice_data: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .create_invoice(invoice_data.into_inner(), &req)
        .await
}

pub async fn get_invoice(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.get_invoice(invoice_id.0, &req).await
}

pub async fn update_invoice(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
    update_data: web::Json<UpdateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .update_invoice(invoice_id.0, update_data.into_inner(), &req)
        .await
}

// 用量
pub async fn list_metrics(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.list_metrics(&req).await
}

pub async fn record_metric(
    req: HttpRequest,
    metric_data: web::Json<RecordMetricRequest>,
) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE
        .record_metric(metric_data.into_inner(), &req)
        .await
}

pub async fn usage(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.usage(&req).await
}

// 签名校验需要原始请求体
pub async fn webhook(req: HttpRequest, payload: web::Bytes) -> ActixResult<HttpResponse> {
    SUBSCRIPTION_SERVICE.handle_webhook(payload, &req).await
}

// 配置路由
pub fn configure_subscriptions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subscriptions")
            // 套餐查询公开，修改需要登录
            .service(
                web::resource("/plans")
                    .route(web::get().to(list_plans))
                    .route(web::post().to(create_plan).wrap(middlewares::RequireJWT)),
            )
            .service(
                web::resource("/plans/{plan_id}")
                    .route(web::get().to(get_plan))
                    .route(web::put().to(update_plan).wrap(middlewares::RequireJWT))
                    .route(web::delete().to(delete_plan).wrap(middlewares::RequireJWT)),
            )
            .route("/webhook", web::post().to(webhook))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/usage", web::get().to(usage))
                    .service(
                        web::resource("/metrics")
                            .route(web::get().to(list_metrics))
                            .route(web::post().to(record_metric)),
                    )
                    .service(
                        web::resource("/invoices")
                            .route(web::get().to(list_invoices))
                            .route(web::post().to(create_invoice)),
                    )
                    .service(
                        web::resource("/invoices/{invoice_id}")
                            .route(web::get().to(get_invoice))
                            .route(web::put().to(update_invoice)),
                    )
                    .service(
                        web::resource("")
                            .route(web::get().to(list_subscriptions))
                            .route(web::post().to(create_subscription)),
                    )
                    .service(
                        web::resource("/{subscription_id}")
                            .route(web::get().to(get_subscription))
                            .route(web::put().to(update_subscription)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::TestContext;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_webhook_without_signature_returns_400() {
        let ctx = TestContext::new().await;
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_subscriptions_routes),
        )
        .await;

        // Webhook 不需要登录，但必须带签名头
        let req = test::TestRequest::post()
            .uri("/api/v1/subscriptions/webhook")
            .set_json(json!({"type": "invoice.paid", "data": {"object": {"id": "in_1"}}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4005);
        assert_eq!(body["message"], "Missing Stripe signature");
    }

    #[actix_web::test]
    async fn test_plans_are_public_but_subscriptions_are_not() {
        let ctx = TestContext::new().await;
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_subscriptions_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/v1/subscriptions/plans")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/subscriptions")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
