use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::CourseValidationResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn validate_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let response = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => CourseValidationResponse {
            exists: true,
            course: Some(course),
            available_courses: None,
            message: None,
        },
        Ok(None) => match storage.list_course_refs().await {
            Ok(available) => CourseValidationResponse {
                exists: false,
                course: None,
                available_courses: Some(available),
                message: Some(format!("Course with ID {course_id} not found")),
            },
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to list courses: {e}"),
                    )),
                );
            }
        },
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to validate course: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Course validated")))
}
