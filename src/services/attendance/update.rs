use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::UpdateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};

fn update_failed(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Attendance update failed: {e}"),
    ))
}

pub async fn update_attendance(
    service: &AttendanceService,
    attendance_id: i64,
    update_data: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 改日期时，目标日期不能已有该学生的另一条记录
    if let Some(new_date) = update_data.date {
        let current = match storage.get_attendance_by_id(attendance_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceNotFound,
                    "Attendance record not found",
                )));
            }
            Err(e) => return Ok(update_failed(e)),
        };

        match storage.find_attendance(current.student_id, new_date).await {
            Ok(Some(other)) if other.id != current.id => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceConflict,
                    format!(
                        "Attendance already recorded for student {} on {}",
                        current.student_id, new_date
                    ),
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(update_failed(e)),
        }
    }

    match storage.update_attendance(attendance_id, update_data).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance record updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        ))),
        Err(e) => Ok(update_failed(e)),
    }
}
