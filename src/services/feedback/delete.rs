use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedbackService;
use crate::models::{ApiResponse, ErrorCode, OkResponse};
use crate::services::teacher_stats::refresh_after_feedback;

pub async fn delete_feedback(
    service: &FeedbackService,
    feedback_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先取出教师 ID，删除后重算统计
    let feedback = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) => feedback,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get feedback: {e}"),
                )),
            );
        }
    };

    match storage.delete_feedback(feedback_id).await {
        Ok(true) => {
            refresh_after_feedback(&storage, feedback.teacher_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                OkResponse::ok(),
                "Feedback deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Feedback deletion failed: {e}"),
            )),
        ),
    }
}
