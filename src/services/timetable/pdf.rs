//! 班级课表 PDF 下载

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::collections::HashMap;
use tracing::error;

use super::{TimetableService, internal_error};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use crate::pdf::timetable::{TimetableSession, render_timetable};

pub async fn group_pdf(
    service: &TimetableService,
    group_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let group = match storage.get_group_by_id(group_id).await {
        Ok(Some(group)) => group,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GroupNotFound,
                "Group not found",
            )));
        }
        Err(e) => return Ok(internal_error(format!("Failed to get group: {e}"))),
    };

    let entries = match storage.list_timetable_by_group(group_id).await {
        Ok(entries) => entries,
        Err(e) => return Ok(internal_error(format!("Failed to list timetable: {e}"))),
    };

    // 课程名缓存，避免重复查询
    let mut course_names: HashMap<i64, String> = HashMap::new();
    let mut sessions = Vec::with_capacity(entries.len());
    for entry in &entries {
        let label = match entry.course_id {
            Some(course_id) => {
                if !course_names.contains_key(&course_id) {
                    let name = match storage.get_course_by_id(course_id).await {
                        Ok(course) => course.map(|c| c.name).unwrap_or_default(),
                        Err(e) => {
                            return Ok(internal_error(format!("Failed to get course: {e}")));
                        }
                    };
                    course_names.insert(course_id, name);
                }
                course_names.get(&course_id).cloned().unwrap_or_default()
            }
            None => String::new(),
        };
        sessions.push(TimetableSession {
            day_of_week: entry.day_of_week,
            start_time: entry.start_time,
            end_time: entry.end_time,
            label,
        });
    }

    let dir = AppConfig::get().storage.documents_path();
    let group_name = group.name.clone();
    let rendered =
        actix_web::web::block(move || render_timetable(&dir, &group_name, &sessions)).await;

    let path = match rendered {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            error!("Timetable PDF rendering failed: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DocumentRenderFailed,
                format!("Failed to render timetable: {e}"),
            )));
        }
        Err(e) => return Ok(internal_error(format!("Failed to render timetable: {e}"))),
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => return Ok(internal_error(format!("Failed to read timetable PDF: {e}"))),
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"timetable_{}.pdf\"", group.name),
        ))
        .body(bytes))
}
