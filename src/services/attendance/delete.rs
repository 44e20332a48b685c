use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, OkResponse};

pub async fn delete_attendance(
    service: &AttendanceService,
    attendance_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_attendance(attendance_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OkResponse::ok(),
            "Attendance record deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Attendance deletion failed: {e}"),
            )),
        ),
    }
}
