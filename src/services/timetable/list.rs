use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::rules::{INVALID_DAY_MESSAGE, is_valid_day};
use super::{TimetableService, internal_error};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_entries(
    service: &TimetableService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_timetable().await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entries,
            "Timetable retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list timetable: {e}"))),
    }
}

pub async fn list_by_group(
    service: &TimetableService,
    group_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_group_by_id(group_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GroupNotFound,
                "Group not found",
            )));
        }
        Err(e) => return Ok(internal_error(format!("Failed to get group: {e}"))),
    }

    match storage.list_timetable_by_group(group_id).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entries,
            "Group timetable retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list timetable: {e}"))),
    }
}

pub async fn list_by_day(
    service: &TimetableService,
    day_of_week: i32,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !is_valid_day(day_of_week) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidDayOfWeek,
            INVALID_DAY_MESSAGE,
        )));
    }

    let storage = service.get_storage(request);

    match storage.list_timetable_by_day(day_of_week).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entries,
            "Day timetable retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to list timetable: {e}"))),
    }
}

pub async fn get_entry(
    service: &TimetableService,
    timetable_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_timetable_entry(timetable_id).await {
        Ok(Some(entry)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            entry,
            "Timetable entry retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimetableNotFound,
            "Timetable entry not found",
        ))),
        Err(e) => Ok(internal_error(format!("Failed to get timetable entry: {e}"))),
    }
}
