pub mod generate;
pub mod list;
pub mod statistics;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reports::requests::{GenerateReportRequest, RecentReportsQuery, ReportListQuery};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
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

    // 报表中心统计卡片
    pub async fn statistics_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::statistics_summary(self, request).await
    }

    pub async fn recent_reports(
        &self,
        query: RecentReportsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        summary::recent_reports(self, query, request).await
    }

    pub async fn list_reports(
        &self,
        query: ReportListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_reports(self, query, request).await
    }

    pub async fn generate_report(
        &self,
        report_data: GenerateReportRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_report(self, report_data, request).await
    }
}
