use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    pub report_type: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub include_graphs: bool,
    #[serde(default)]
    pub include_detailed_data: bool,
    #[serde(default)]
    pub include_advanced_analysis: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct RecentReportsQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ReportListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[serde(rename = "type")]
    pub report_type: Option<String>,
}
