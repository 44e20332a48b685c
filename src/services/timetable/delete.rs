use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TimetableService, internal_error};
use crate::models::timetable::entities::TimetableMessageResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_entry(
    service: &TimetableService,
    timetable_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_timetable_entry(timetable_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TimetableMessageResponse {
                message: "Timetable entry deleted successfully".to_string(),
            },
            "Timetable entry deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimetableNotFound,
            "Timetable entry not found",
        ))),
        Err(e) => Ok(internal_error(format!("Timetable entry deletion failed: {e}"))),
    }
}
