use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

pub async fn system_info(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.system_info(&request).await
}

pub async fn check_settings(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.check_settings(&request).await
}

pub async fn serve_storage_file(
    request: HttpRequest,
    file_path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .serve_storage_file(file_path.into_inner(), &request)
        .await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/storage/{file_path:.*}", web::get().to(serve_storage_file))
        .service(
            web::resource("/api/v1/system-info")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(system_info)),
        )
        .service(
            web::resource("/api/v1/system/check-settings")
                .wrap(middlewares::RequireJWT)
                .route(web::get().to(check_settings)),
        );
}
