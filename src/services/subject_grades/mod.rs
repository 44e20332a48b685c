pub mod averages;
pub mod bulk;
pub mod export;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subject_grades::requests::{
    BulkGradesRequest, GroupAveragesQuery, GroupSubjectQuery, StudentGradesQuery,
};
use crate::storage::Storage;

pub struct SubjectGradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectGradeService {
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

    // 批量录入成绩
    pub async fn bulk_upsert(
        &self,
        payload: BulkGradesRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bulk::bulk_upsert(self, payload, request).await
    }

    pub async fn list_by_group_subject(
        &self,
        query: GroupSubjectQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_group_subject(self, query, request).await
    }

    pub async fn list_by_student(
        &self,
        query: StudentGradesQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_student(self, query, request).await
    }

    pub async fn averages_by_group(
        &self,
        query: GroupAveragesQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        averages::averages_by_group(self, query, request).await
    }

    pub async fn export_averages(
        &self,
        query: GroupAveragesQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_averages(self, query, request).await
    }
}
