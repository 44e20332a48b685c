use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::settings::requests::UpdateSettingsRequest;
use crate::services::SettingsService;

// 懒加载的全局 SettingsService 实例
static SETTINGS_SERVICE: Lazy<SettingsService> = Lazy::new(SettingsService::new_lazy);

pub async fn get_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    SETTINGS_SERVICE.get_settings(&req).await
}

pub async fn update_settings(
    req: HttpRequest,
    update_data: web::Json<UpdateSettingsRequest>,
) -> ActixResult<HttpResponse> {
    SETTINGS_SERVICE
        .update_settings(update_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_settings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/settings")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_settings))
                    .route(web::put().to(update_settings)),
            ),
    );
}
