use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/settings.ts")]
pub struct InstitutionSettings {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub time_zone: String,
    pub language: String,
    pub dark_mode: bool,
    pub font_size: String,
    pub auto_print: bool,
    pub logo_data_url: String,
    pub location: String,
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
