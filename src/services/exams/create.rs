use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ExamService;
use crate::models::exams::requests::CreateExamRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_exam(
    service: &ExamService,
    exam_data: CreateExamRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if exam_data.max_score <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "max_score must be greater than 0",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_exam(exam_data).await {
        Ok(exam) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(exam, "Exam created successfully"))),
        Err(e) => {
            error!("Exam creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Exam creation failed: {e}"),
                )),
            )
        }
    }
}
