use serde::Serialize;
use ts_rs::TS;

use crate::models::settings::entities::InstitutionSettings;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemInfoResponse {
    pub version: String,
    #[serde(rename = "totalStudents")]
    pub total_students: i64,
    pub uptime_seconds: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            database: Some("connected".to_string()),
            detail: None,
        }
    }

    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            database: None,
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct CheckSettingsResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<InstitutionSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
