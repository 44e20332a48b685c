use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SettingsService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_settings(
    service: &SettingsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let settings = match storage.get_settings().await {
        Ok(Some(settings)) => Ok(settings),
        Ok(None) => {
            info!("No institution settings found, creating defaults");
            storage.create_default_settings().await
        }
        Err(e) => Err(e),
    };

    match settings {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            settings,
            "Settings retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load settings: {e}"),
            )),
        ),
    }
}
