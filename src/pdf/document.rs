use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use super::{PdfCanvas, output_path};
use crate::errors::Result;
use crate::models::documents::entities::document_title;

/// meta 中的每个字段渲染为一行 `key: value`
pub fn meta_lines(meta: Option<&Value>) -> Vec<String> {
    match meta {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key}: {s}"),
                other => format!("{key}: {other}"),
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(other) => vec![other.to_string()],
    }
}

/// 渲染证明类文件（在读证明、成绩单、请假条）
pub fn render_document(
    dir: &Path,
    doc_type: &str,
    student_name: Option<&str>,
    meta: Option<&Value>,
    signed: bool,
) -> Result<PathBuf> {
    let file_name = format!("document_{doc_type}_{}.pdf", Utc::now().timestamp());
    let path = output_path(dir, &file_name)?;

    let mut canvas = PdfCanvas::portrait("Official Document")?;
    canvas.title(document_title(doc_type));

    if let Some(name) = student_name {
        canvas.line_of_text(&format!("Student: {name}"), 11.0, false);
    }

    let lines = meta_lines(meta);
    if !lines.is_empty() {
        canvas.gap(3.0);
        for line in &lines {
            canvas.line_of_text(line, 11.0, false);
        }
    }

    canvas.gap(8.0);
    let signature = if signed { "Digitally signed" } else { "Unsigned" };
    canvas.line_of_text(signature, 11.0, false);

    canvas.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_lines() {
        let meta = json!({"reason": "Maladie", "days": 3});
        assert_eq!(meta_lines(Some(&meta)), vec!["days: 3", "reason: Maladie"]);
        assert!(meta_lines(None).is_empty());
        assert!(meta_lines(Some(&Value::Null)).is_empty());
        assert_eq!(meta_lines(Some(&json!("libre"))), vec!["libre"]);
    }

    #[test]
    fn test_render_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = render_document(
            dir.path(),
            "certificate",
            Some("Youssef Alaoui"),
            Some(&json!({"year": "2025/2026"})),
            true,
        )
        .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("document_certificate_"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
