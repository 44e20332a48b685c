pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, query, request).await
    }

    // 同一学生同一天只保留一条
    pub async fn record_attendance(
        &self,
        attendance_data: CreateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::record_attendance(self, attendance_data, request).await
    }

    pub async fn get_attendance(
        &self,
        attendance_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_attendance(self, attendance_id, request).await
    }

    pub async fn update_attendance(
        &self,
        attendance_id: i64,
        update_data: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_attendance(self, attendance_id, update_data, request).await
    }

    pub async fn delete_attendance(
        &self,
        attendance_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, attendance_id, request).await
    }
}
