use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::rules::{
    INVALID_DAY_MESSAGE, TIME_CONFLICT_MESSAGE, find_conflict, is_valid_day, is_valid_range,
    merge_update,
};
use super::{TimetableService, check_references, internal_error};
use crate::models::timetable::requests::UpdateTimetableRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_entry(
    service: &TimetableService,
    timetable_id: i64,
    update_data: UpdateTimetableRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current = match storage.get_timetable_entry(timetable_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TimetableNotFound,
                "Timetable entry not found",
            )));
        }
        Err(e) => return Ok(internal_error(format!("Failed to get timetable entry: {e}"))),
    };

    let merged = merge_update(&current, &update_data);

    if !is_valid_day(merged.day_of_week) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidDayOfWeek,
            INVALID_DAY_MESSAGE,
        )));
    }
    if !is_valid_range(merged.start_time, merged.end_time) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidTimeRange,
            "start_time must be before end_time",
        )));
    }

    // 只校验发生变化的引用
    let changed_group = update_data
        .group_id
        .filter(|id| *id != current.group_id);
    let changed_course = update_data
        .course_id
        .filter(|id| Some(*id) != current.course_id);
    if let Some(response) = check_references(&storage, changed_group, changed_course).await {
        return Ok(response);
    }

    let same_day = match storage
        .list_timetable_by_group_and_day(merged.group_id, merged.day_of_week)
        .await
    {
        Ok(entries) => entries,
        Err(e) => return Ok(internal_error(format!("Failed to check conflicts: {e}"))),
    };
    if find_conflict(
        &same_day,
        merged.group_id,
        merged.day_of_week,
        merged.start_time,
        merged.end_time,
        Some(timetable_id),
    )
    .is_some()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TimeConflict,
            TIME_CONFLICT_MESSAGE,
        )));
    }

    match storage.replace_timetable_entry(merged).await {
        Ok(Some(entry)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entry,
            "Timetable entry updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimetableNotFound,
            "Timetable entry not found",
        ))),
        Err(e) => Ok(internal_error(format!("Timetable entry update failed: {e}"))),
    }
}
