use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::{CourseDetailResponse, CourseRef};
use crate::models::{ApiResponse, ErrorCode};

/// 课程不存在时提示可用的课程 ID
pub(crate) fn course_not_found_message(course_id: i64, available: &[CourseRef]) -> String {
    let ids: Vec<i64> = available.iter().map(|c| c.id).collect();
    format!("Course with ID {course_id} not found. Available course IDs: {ids:?}")
}

pub async fn get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            let available = storage.list_course_refs().await.unwrap_or_default();
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                course_not_found_message(course_id, &available),
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course: {e}"),
                )),
            );
        }
    };

    let group = match course.group_id {
        Some(group_id) => match storage.get_group_by_id(group_id).await {
            Ok(group) => group,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to get course group: {e}"),
                    )),
                );
            }
        },
        None => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse { course, group },
        "Course retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_ids() {
        let available = vec![
            CourseRef {
                id: 2,
                name: "Maths".to_string(),
            },
            CourseRef {
                id: 5,
                name: "Physique".to_string(),
            },
        ];
        assert_eq!(
            course_not_found_message(9, &available),
            "Course with ID 9 not found. Available course IDs: [2, 5]"
        );
        assert_eq!(
            course_not_found_message(1, &[]),
            "Course with ID 1 not found. Available course IDs: []"
        );
    }
}
