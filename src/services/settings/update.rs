use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SettingsService;
use crate::models::settings::requests::UpdateSettingsRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_settings(
    service: &SettingsService,
    update_data: UpdateSettingsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = update_data.email.as_deref().filter(|e| !e.is_empty())
        && let Err(msg) = crate::utils::validate::validate_email(email)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ContactInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_settings(update_data).await {
        Ok(Some(settings)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            settings,
            "Settings updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingsNotFound,
            "Settings not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Settings update failed: {e}"),
            )),
        ),
    }
}
