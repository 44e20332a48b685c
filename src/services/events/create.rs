use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::requests::CreateEventRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_event(
    service: &EventService,
    event_data: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if event_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Event title cannot be empty",
        )));
    }
    if let Some(end) = event_data.end
        && end < event_data.start
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTimeRange,
            "Event end must not be before start",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_event(event_data).await {
        Ok(event) => Ok(HttpResponse::Created().json(ApiResponse::success(
            event,
            "Event created successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Event creation failed: {e}"),
            )),
        ),
    }
}
