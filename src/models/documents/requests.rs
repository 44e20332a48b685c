use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct GenerateDocumentRequest {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub student_id: Option<i64>,
    #[serde(default)]
    pub signed: bool,
    #[ts(type = "Record<string, unknown> | null")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct UpdateDocumentRequest {
    pub signed: Option<bool>,
    #[ts(type = "Record<string, unknown> | null")]
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct DocumentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
}
