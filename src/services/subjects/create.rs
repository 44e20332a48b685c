use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_subject(
    service: &SubjectService,
    mut subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    subject_data.name = subject_data.name.trim().to_string();
    if subject_data.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Subject name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_subject_by_name(&subject_data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubjectAlreadyExists,
                "Subject with this name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check subject name: {e}"),
                )),
            );
        }
    }

    match storage.create_subject(subject_data).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject created successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Subject creation failed: {e}"),
            )),
        ),
    }
}
