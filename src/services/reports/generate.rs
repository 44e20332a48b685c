use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use super::ReportService;
use super::statistics;
use crate::config::AppConfig;
use crate::errors::{EduManageError, Result};
use crate::models::reports::requests::GenerateReportRequest;
use crate::models::reports::responses::GenerateReportResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::pdf::report::render_report;
use crate::services::teacher_stats::summarize_feedback;
use crate::storage::Storage;

/// 按报表类型收集统计项，财务与出勤按报表周期过滤
pub async fn collect_statistics(
    storage: &Arc<dyn Storage>,
    req: &GenerateReportRequest,
) -> Result<Map<String, Value>> {
    let stats = match req.report_type.as_str() {
        "financial" => {
            let totals = storage
                .payment_totals(req.period_start, req.period_end)
                .await?;
            statistics::financial(&totals)
        }
        "attendance_analysis" => {
            let totals = storage
                .attendance_totals(req.period_start, req.period_end)
                .await?;
            statistics::attendance(&totals)
        }
        "student_performance" => {
            let (avg, count) = storage.exam_score_summary().await?;
            statistics::student_performance(avg, count)
        }
        "teacher_performance" => {
            let feedback = storage.list_feedback(0, i64::MAX as u64).await?;
            statistics::teacher_performance(&summarize_feedback(&feedback))
        }
        _ => statistics::basic(),
    };
    Ok(stats)
}

pub async fn generate_report(
    service: &ReportService,
    report_data: GenerateReportRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let stats = match collect_statistics(&storage, &report_data).await {
        Ok(stats) => stats,
        Err(e) => {
            error!("Failed to collect report statistics: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to collect report statistics: {e}"),
                )),
            );
        }
    };
    debug!(
        "Report options: graphs={}, detailed={}, advanced={}",
        report_data.include_graphs,
        report_data.include_detailed_data,
        report_data.include_advanced_analysis
    );

    let config = AppConfig::get();
    let dir = config.storage.reports_path();
    let report_type = report_data.report_type.clone();
    let period = (report_data.period_start, report_data.period_end);
    let pdf_stats = stats.clone();
    let rendered = actix_web::web::block(move || render_report(&dir, &report_type, period, &pdf_stats))
        .await
        .map_err(|e| EduManageError::document_render(format!("Report task failed: {e}")))
        .and_then(|r| r);

    let path = match rendered {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            error!("Report rendering failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DocumentRenderFailed,
                    format!("Report rendering failed: {e}"),
                )),
            );
        }
    };

    match storage
        .create_report(
            &report_data.report_type,
            report_data.period_start,
            report_data.period_end,
            Some(path.clone()),
        )
        .await
    {
        Ok(report) => {
            info!("Report {} generated: {}", report.id, path);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GenerateReportResponse {
                    report,
                    file_url: config.storage.public_url(&path),
                    statistics: stats,
                },
                "Report generated successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to save report: {e}"),
            )),
        ),
    }
}
