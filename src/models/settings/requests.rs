use serde::Deserialize;
use ts_rs::TS;

// 部分更新，仅覆盖非空字段
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/settings.ts")]
pub struct UpdateSettingsRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub time_zone: Option<String>,
    pub language: Option<String>,
    pub dark_mode: Option<bool>,
    pub font_size: Option<String>,
    pub auto_print: Option<bool>,
    pub logo_data_url: Option<String>,
    pub location: Option<String>,
    pub logo_path: Option<String>,
    pub academic_year: Option<String>,
    pub current_semester: Option<String>,
    #[ts(type = "unknown")]
    pub grading_scale: Option<serde_json::Value>,
    #[ts(type = "unknown")]
    pub attendance_types: Option<serde_json::Value>,
    #[ts(type = "unknown")]
    pub payment_methods: Option<serde_json::Value>,
    #[ts(type = "unknown")]
    pub document_types: Option<serde_json::Value>,
    #[ts(type = "unknown")]
    pub event_types: Option<serde_json::Value>,
}
