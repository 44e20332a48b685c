use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{StudentService, validate_student_fields};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subscriptions::entities::LimitedResource;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::usage::{ensure_capacity, track_usage};

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_student_fields(
        student_data.email.as_deref(),
        student_data.phone.as_deref(),
        student_data.gender.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ContactInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 套餐上限检查
    let admin_id = match ensure_capacity(&storage, request, LimitedResource::Students).await {
        Ok(admin_id) => admin_id,
        Err(response) => return Ok(response),
    };

    match storage.create_student(student_data).await {
        Ok(student) => {
            track_usage(&storage, admin_id, LimitedResource::Students).await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Student creation failed: {e}"),
                )),
            )
        }
    }
}
