use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::Utc;

use super::SystemService;
use crate::models::system::responses::{CheckSettingsResponse, SystemInfoResponse};
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

pub async fn system_info(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let total_students = match storage.count_students().await {
        Ok(count) => count as i64,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count students: {e}"),
                )),
            );
        }
    };

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SystemInfoResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_students,
            uptime_seconds,
        },
        "System info retrieved successfully",
    )))
}

pub async fn check_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_settings().await {
        Ok(settings) => {
            let response = match settings {
                Some(settings) => CheckSettingsResponse {
                    exists: true,
                    settings: Some(settings),
                    message: None,
                },
                None => CheckSettingsResponse {
                    exists: false,
                    settings: None,
                    message: Some("No settings found in the database.".to_string()),
                },
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Settings checked")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to check settings: {e}"),
            )),
        ),
    }
}
