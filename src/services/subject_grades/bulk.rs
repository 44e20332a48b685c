use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectGradeService;
use crate::models::subject_grades::entities::StudentGrade;
use crate::models::subject_grades::requests::BulkGradesRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn bulk_upsert(
    service: &SubjectGradeService,
    payload: BulkGradesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if payload.grades.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<StudentGrade>::new(),
            "No grades to save",
        )));
    }

    let storage = service.get_storage(request);

    // 同一批次内重复的学生和班级只查一次
    let mut checked_students = HashSet::new();
    let mut checked_groups = HashSet::new();
    for item in &payload.grades {
        if checked_students.insert(item.student_id) {
            match storage.get_student_by_id(item.student_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::StudentNotFound,
                        format!("Student {} not found", item.student_id),
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
        if checked_groups.insert(item.group_id) {
            match storage.get_group_by_id(item.group_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::GroupNotFound,
                        format!("Group {} not found", item.group_id),
                    )));
                }
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to get group: {e}"),
                        )),
                    );
                }
            }
        }
    }

    let count = payload.grades.len();
    match storage.upsert_student_grades(payload.grades).await {
        Ok(saved) => {
            info!("Saved {} subject grades", count);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                saved,
                "Grades saved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to save grades: {e}"),
            )),
        ),
    }
}
