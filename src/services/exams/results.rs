//! 考试成绩录入与查询

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ExamService;
use crate::models::exams::requests::SubmitExamResultsRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn submit_results(
    service: &ExamService,
    exam_id: i64,
    payload: SubmitExamResultsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "Exam not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exam: {e}"),
                )),
            );
        }
    }

    // 任一学生不存在则整批拒绝
    for result in &payload.results {
        match storage.get_student_by_id(result.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotFound,
                    format!("Student {} not found", result.student_id),
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
    }

    let count = payload.results.len();
    match storage.upsert_exam_results(exam_id, payload.results).await {
        Ok(results) => {
            info!("Recorded {} results for exam {}", count, exam_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                results,
                "Exam results recorded successfully",
            )))
        }
        Err(e) => {
            error!("Failed to record exam results: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to record exam results: {e}"),
                )),
            )
        }
    }
}

pub async fn list_results(
    service: &ExamService,
    exam_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ExamNotFound,
                "Exam not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get exam: {e}"),
                )),
            );
        }
    }

    match storage.list_exam_results(exam_id).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            results,
            "Exam results retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list exam results: {e}"),
            )),
        ),
    }
}
