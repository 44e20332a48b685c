pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod results;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{
    CreateExamRequest, ExamListQuery, SubmitExamResultsRequest, UpdateExamRequest,
};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
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

    pub async fn list_exams(
        &self,
        query: ExamListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, query, request).await
    }

    pub async fn create_exam(
        &self,
        exam_data: CreateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, exam_data, request).await
    }

    pub async fn get_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_exam(self, exam_id, request).await
    }

    pub async fn update_exam(
        &self,
        exam_id: i64,
        update_data: UpdateExamRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, exam_id, update_data, request).await
    }

    pub async fn delete_exam(&self, exam_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, exam_id, request).await
    }

    // 批量录入成绩
    pub async fn submit_results(
        &self,
        exam_id: i64,
        results: SubmitExamResultsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::submit_results(self, exam_id, results, request).await
    }

    pub async fn list_results(
        &self,
        exam_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::list_results(self, exam_id, request).await
    }
}
