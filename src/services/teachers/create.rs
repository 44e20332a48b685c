use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TeacherService;
use crate::models::subscriptions::entities::LimitedResource;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::usage::{ensure_capacity, track_usage};
use crate::utils::validate::validate_contact;

pub async fn create_teacher(
    service: &TeacherService,
    teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_contact(
        teacher_data.email.as_deref(),
        teacher_data.phone.as_deref(),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ContactInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let admin_id = match ensure_capacity(&storage, request, LimitedResource::Teachers).await {
        Ok(admin_id) => admin_id,
        Err(response) => return Ok(response),
    };

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            track_usage(&storage, admin_id, LimitedResource::Teachers).await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(teacher, "Teacher created successfully")))
        }
        Err(e) => {
            error!("Teacher creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Teacher creation failed: {e}"),
                )),
            )
        }
    }
}
