use serde::Serialize;
use ts_rs::TS;

use super::entities::Document;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct GenerateDocumentResponse {
    pub document: Document,
    pub file_url: Option<String>,
}
