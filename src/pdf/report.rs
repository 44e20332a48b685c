use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};

use super::{PdfCanvas, output_path};
use crate::errors::Result;
use crate::models::reports::entities::title_case;

pub fn report_title(report_type: &str) -> String {
    match report_type {
        "student_performance" => "Student Performance Report".to_string(),
        "teacher_performance" => "Teacher Performance Report".to_string(),
        "course_analytics" => "Course Analytics Report".to_string(),
        "attendance_analysis" => "Attendance Analysis Report".to_string(),
        "enrollment" => "Enrollment Report".to_string(),
        "financial" => "Financial Overview Report".to_string(),
        other => title_case(other),
    }
}

/// 整数部分加千位分隔符，其余原样输出
pub fn format_metric_value(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            let raw = n.to_string();
            let (sign, rest) = match raw.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", raw.as_str()),
            };
            let (int_part, frac_part) = match rest.split_once('.') {
                Some((i, f)) => (i, Some(f)),
                None => (rest, None),
            };
            let mut grouped = String::new();
            for (i, c) in int_part.chars().enumerate() {
                if i > 0 && (int_part.len() - i) % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(c);
            }
            match frac_part {
                Some(f) => format!("{sign}{grouped}.{f}"),
                None => format!("{sign}{grouped}"),
            }
        }
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

pub fn metric_rows(stats: &Map<String, Value>) -> Vec<(String, String)> {
    stats
        .iter()
        .map(|(key, value)| (title_case(key), format_metric_value(value)))
        .collect()
}

/// 渲染统计报表，返回写入的文件路径
pub fn render_report(
    dir: &Path,
    report_type: &str,
    period: (Option<NaiveDate>, Option<NaiveDate>),
    stats: &Map<String, Value>,
) -> Result<PathBuf> {
    let file_name = format!("report_{report_type}_{}.pdf", Utc::now().timestamp());
    let path = output_path(dir, &file_name)?;

    let mut canvas = PdfCanvas::portrait("EDUMANAGE Report")?;
    canvas.title(&report_title(report_type));

    let fmt_date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
    canvas.line_of_text(
        &format!("Period: {} -> {}", fmt_date(period.0), fmt_date(period.1)),
        11.0,
        false,
    );
    canvas.gap(4.0);

    if !stats.is_empty() {
        canvas.two_column_table(("Metric", "Value"), &metric_rows(stats), (90.0, 60.0));
    }

    canvas.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_metric_value() {
        assert_eq!(format_metric_value(&json!(1234567)), "1,234,567");
        assert_eq!(format_metric_value(&json!(950.5)), "950.5");
        assert_eq!(format_metric_value(&json!(-12000)), "-12,000");
        assert_eq!(format_metric_value(&json!("n/a")), "n/a");
        assert_eq!(format_metric_value(&Value::Null), "-");
    }

    #[test]
    fn test_metric_rows_title_case_keys() {
        let mut stats = Map::new();
        stats.insert("total_revenue".into(), json!(5000.0));
        stats.insert("recovery_rate_percent".into(), json!(83.3));
        let rows = metric_rows(&stats);
        assert!(rows.contains(&("Total Revenue".to_string(), "5,000.0".to_string())));
        assert!(rows.contains(&("Recovery Rate Percent".to_string(), "83.3".to_string())));
    }

    #[test]
    fn test_report_title_fallback() {
        assert_eq!(report_title("financial"), "Financial Overview Report");
        assert_eq!(report_title("custom_audit"), "Custom Audit");
    }

    #[test]
    fn test_render_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut stats = Map::new();
        stats.insert("attendance_records".into(), json!(12));
        let path = render_report(dir.path(), "attendance_analysis", (None, None), &stats).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("report_attendance_analysis_"));
        assert!(name.ends_with(".pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
