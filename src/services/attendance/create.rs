use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::AttendanceService;
use crate::models::attendance::requests::CreateAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn record_attendance(
    service: &AttendanceService,
    attendance_data: CreateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(attendance_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student: {e}"),
                )),
            );
        }
    }

    debug!(
        "Recording attendance for student {} on {}: {}",
        attendance_data.student_id, attendance_data.date, attendance_data.status
    );

    match storage.upsert_attendance(attendance_data).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance recorded successfully",
        ))),
        Err(e) => {
            error!("Failed to record attendance: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to record attendance: {e}"),
                )),
            )
        }
    }
}
