pub mod calendar;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    pub async fn list_events(
        &self,
        query: EventListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, query, request).await
    }

    // 日历视图：事件 + 本周课表
    pub async fn fullcalendar(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        calendar::fullcalendar(self, request).await
    }

    pub async fn create_event(
        &self,
        event_data: CreateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, event_data, request).await
    }

    pub async fn get_event(&self, event_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_event(self, event_id, request).await
    }

    pub async fn update_event(
        &self,
        event_id: i64,
        update_data: UpdateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, event_id, update_data, request).await
    }

    pub async fn delete_event(
        &self,
        event_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, event_id, request).await
    }
}
