use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FeedbackService;
use crate::models::feedback::requests::FeedbackListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::teacher_stats::summarize_feedback;

const DEFAULT_LIMIT: u64 = 100;

pub async fn list_feedback(
    service: &FeedbackService,
    query: FeedbackListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    match storage.list_feedback(skip, limit).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Feedback retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list feedback: {e}"),
            )),
        ),
    }
}

pub async fn list_by_teacher(
    service: &FeedbackService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_feedback_by_teacher(teacher_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Teacher feedback retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list feedback: {e}"),
            )),
        ),
    }
}

pub async fn list_by_course(
    service: &FeedbackService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_feedback_by_course(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Course feedback retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list feedback: {e}"),
            )),
        ),
    }
}

// 无评价时各项为 0
pub async fn teacher_stats(
    service: &FeedbackService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_feedback_by_teacher(teacher_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summarize_feedback(&items),
            "Teacher feedback statistics retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to compute feedback statistics: {e}"),
            )),
        ),
    }
}
