use serde::Serialize;
use ts_rs::TS;

use super::entities::Report;

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportStats {
    pub total_reports: i64,
    pub generated_today: i64,
    pub pending_reports: i64,
    pub download_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportStatsSummary {
    pub report_stats: ReportStats,
}

// 报表中心"最近报表"卡片
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct RecentReport {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub description: String,
    #[serde(rename = "generatedBy")]
    pub generated_by: String,
    #[serde(rename = "generatedDate")]
    pub generated_date: String,
    pub format: String,
    pub size: String,
    pub downloads: i64,
    pub status: String, // ready / pending
    pub category: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct GenerateReportResponse {
    pub report: Report,
    pub file_url: Option<String>,
    #[ts(type = "Record<string, number | string>")]
    pub statistics: serde_json::Map<String, serde_json::Value>,
}
