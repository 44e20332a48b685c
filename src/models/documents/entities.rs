use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct Document {
    pub id: i64,
    #[serde(rename = "type")]
    pub doc_type: String, // certificate / report_card / absence_excuse
    pub student_id: Option<i64>,
    pub file_path: Option<String>,
    pub signed: bool,
    #[ts(type = "Record<string, unknown> | null")]
    pub meta: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

pub type DocumentListResponse = PaginatedResponse<Document>;

/// 文档类型对应的 PDF 标题
pub fn document_title(doc_type: &str) -> &'static str {
    match doc_type {
        "certificate" => "Certificate",
        "report_card" => "Report Card",
        "absence_excuse" => "Absence Excuse",
        _ => "Document",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_title() {
        assert_eq!(document_title("certificate"), "Certificate");
        assert_eq!(document_title("report_card"), "Report Card");
        assert_eq!(document_title("absence_excuse"), "Absence Excuse");
        assert_eq!(document_title("other"), "Document");
    }
}
