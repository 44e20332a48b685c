pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::feedback::requests::{CreateFeedbackRequest, FeedbackListQuery};
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
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

    // 提交评价（同一学生、教师、课程只保留一条）
    pub async fn submit_feedback(
        &self,
        feedback_data: CreateFeedbackRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::submit_feedback(self, feedback_data, request).await
    }

    pub async fn list_feedback(
        &self,
        query: FeedbackListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_feedback(self, query, request).await
    }

    pub async fn list_by_teacher(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_teacher(self, teacher_id, request).await
    }

    pub async fn list_by_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_by_course(self, course_id, request).await
    }

    pub async fn teacher_stats(
        &self,
        teacher_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::teacher_stats(self, teacher_id, request).await
    }

    pub async fn delete_feedback(
        &self,
        feedback_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_feedback(self, feedback_id, request).await
    }
}
