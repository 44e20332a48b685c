use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectGradeService;
use crate::models::subject_grades::requests::{GroupSubjectQuery, StudentGradesQuery};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_by_group_subject(
    service: &SubjectGradeService,
    query: GroupSubjectQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grades_by_group_subject(query).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list grades: {e}"),
            )),
        ),
    }
}

pub async fn list_by_student(
    service: &SubjectGradeService,
    query: StudentGradesQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(query.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                format!("Student {} not found", query.student_id),
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

    match storage.list_grades_by_student(query).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grades,
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list grades: {e}"),
            )),
        ),
    }
}
