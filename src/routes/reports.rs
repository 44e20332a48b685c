use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::{GenerateReportRequest, RecentReportsQuery, ReportListQuery};
use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn statistics_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.statistics_summary(&req).await
}

pub async fn recent_reports(
    req: HttpRequest,
    query: web::Query<RecentReportsQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.recent_reports(query.into_inner(), &req).await
}

pub async fn list_reports(
    req: HttpRequest,
    query: web::Query<ReportListQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_reports(query.into_inner(), &req).await
}

pub async fn generate_report(
    req: HttpRequest,
    report_data: web::Json<GenerateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .generate_report(report_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_reports))
            .route("/statistics/summary", web::get().to(statistics_summary))
            .route("/recent", web::get().to(recent_reports))
            .route("/generate", web::post().to(generate_report)),
    );
}
