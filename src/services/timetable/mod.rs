pub mod create;
pub mod delete;
pub mod list;
pub mod pdf;
pub mod rules;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::timetable::requests::{CreateTimetableRequest, UpdateTimetableRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct TimetableService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimetableService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 全部课表（按星期、开始时间排序）
    pub async fn list_entries(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_entries(self, request).await
    }

    pub async fn list_by_group(
        &self,
        group_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_group(self, group_id, request).await
    }

    pub async fn list_by_day(
        &self,
        day_of_week: i32,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_day(self, day_of_week, request).await
    }

    pub async fn get_entry(
        &self,
        timetable_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::get_entry(self, timetable_id, request).await
    }

    // 班级课表 PDF
    pub async fn group_pdf(&self, group_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pdf::group_pdf(self, group_id, request).await
    }

    pub async fn create_entry(
        &self,
        entry_data: CreateTimetableRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_entry(self, entry_data, request).await
    }

    pub async fn update_entry(
        &self,
        timetable_id: i64,
        update_data: UpdateTimetableRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_entry(self, timetable_id, update_data, request).await
    }

    pub async fn delete_entry(
        &self,
        timetable_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_entry(self, timetable_id, request).await
    }
}

/// 班级、课程存在性检查，返回 404 响应或 None
pub(crate) async fn check_references(
    storage: &Arc<dyn Storage>,
    group_id: Option<i64>,
    course_id: Option<i64>,
) -> Option<HttpResponse> {
    if let Some(group_id) = group_id {
        match storage.get_group_by_id(group_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::GroupNotFound,
                    "Group not found",
                )));
            }
            Err(e) => return Some(internal_error(format!("Failed to get group: {e}"))),
        }
    }
    if let Some(course_id) = course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => return Some(internal_error(format!("Failed to get course: {e}"))),
        }
    }
    None
}

pub(crate) fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::error_empty(ErrorCode::InternalServerError, message))
}
