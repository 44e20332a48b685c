use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::subscriptions::entities::LimitedResource;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::usage::{ensure_capacity, track_usage};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    let admin_id = match ensure_capacity(&storage, request, LimitedResource::Courses).await {
        Ok(admin_id) => admin_id,
        Err(response) => return Ok(response),
    };

    match storage.create_course(course_data).await {
        Ok(course) => {
            track_usage(&storage, admin_id, LimitedResource::Courses).await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => {
            error!("Course creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course creation failed: {e}"),
                )),
            )
        }
    }
}
