use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::FeedbackService;
use crate::models::feedback::requests::CreateFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::teacher_stats::refresh_after_feedback;

fn internal(message: String) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, message))
}

pub async fn submit_feedback(
    service: &FeedbackService,
    feedback_data: CreateFeedbackRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = feedback_data.validate_scores() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FeedbackScoreOutOfRange,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_student_by_id(feedback_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                format!("Student with ID {} not found", feedback_data.student_id),
            )));
        }
        Err(e) => return Ok(internal(format!("Failed to get student: {e}"))),
    }

    match storage.get_teacher_by_id(feedback_data.teacher_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                format!("Teacher with ID {} not found", feedback_data.teacher_id),
            )));
        }
        Err(e) => return Ok(internal(format!("Failed to get teacher: {e}"))),
    }

    match storage.get_course_by_id(feedback_data.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let ids: Vec<i64> = match storage.list_course_refs().await {
                Ok(refs) => refs.into_iter().map(|c| c.id).collect(),
                Err(e) => return Ok(internal(format!("Failed to list courses: {e}"))),
            };
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                format!(
                    "Course with ID {} not found. Available courses: {ids:?}",
                    feedback_data.course_id
                ),
            )));
        }
        Err(e) => return Ok(internal(format!("Failed to get course: {e}"))),
    }

    let teacher_id = feedback_data.teacher_id;
    match storage.upsert_feedback(feedback_data).await {
        Ok(feedback) => {
            info!(
                "Feedback {} saved for teacher {}",
                feedback.id, feedback.teacher_id
            );
            refresh_after_feedback(&storage, teacher_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                feedback,
                "Feedback submitted successfully",
            )))
        }
        Err(e) => {
            error!("Failed to save feedback: {}", e);
            Ok(internal(format!("Failed to save feedback: {e}")))
        }
    }
}
