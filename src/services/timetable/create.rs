use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::rules::{
    INVALID_DAY_MESSAGE, TIME_CONFLICT_MESSAGE, find_conflict, is_valid_day, is_valid_range,
};
use super::{TimetableService, check_references, internal_error};
use crate::models::timetable::requests::CreateTimetableRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_entry(
    service: &TimetableService,
    entry_data: CreateTimetableRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !is_valid_day(entry_data.day_of_week) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidDayOfWeek,
            INVALID_DAY_MESSAGE,
        )));
    }
    if !is_valid_range(entry_data.start_time, entry_data.end_time) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTimeRange,
            "start_time must be before end_time",
        )));
    }

    let storage = service.get_storage(request);

    if let Some(response) =
        check_references(&storage, Some(entry_data.group_id), entry_data.course_id).await
    {
        return Ok(response);
    }

    let same_day = match storage
        .list_timetable_by_group_and_day(entry_data.group_id, entry_data.day_of_week)
        .await
    {
        Ok(entries) => entries,
        Err(e) => return Ok(internal_error(format!("Failed to check conflicts: {e}"))),
    };
    if let Some(existing) = find_conflict(
        &same_day,
        entry_data.group_id,
        entry_data.day_of_week,
        entry_data.start_time,
        entry_data.end_time,
        None,
    ) {
        info!("Timetable conflict with entry {}", existing.id);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TimeConflict,
            TIME_CONFLICT_MESSAGE,
        )));
    }

    match storage.create_timetable_entry(entry_data).await {
        Ok(entry) => Ok(HttpResponse::Created().json(ApiResponse::success(
            entry,
            "Timetable entry created successfully",
        ))),
        Err(e) => {
            error!("Timetable entry creation failed: {}", e);
            Ok(internal_error(format!("Timetable entry creation failed: {e}")))
        }
    }
}
