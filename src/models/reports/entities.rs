use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct Report {
    pub id: i64,
    #[serde(rename = "type")]
    pub report_type: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub file_path: Option<String>, // 为空表示尚未生成
    pub created_at: DateTime<Utc>,
}

pub type ReportListResponse = PaginatedResponse<Report>;

/// 报表类型对应的展示信息（标题、描述、分类）
pub struct ReportLabels {
    pub title: String,
    pub description: String,
    pub category: &'static str,
}

impl ReportLabels {
    pub fn for_type(report_type: &str, created: NaiveDate) -> Self {
        let (title, description, category) = match report_type {
            "financial" => (
                "Rapport Financier",
                "Rapport mensuel des revenus et collecte des paiements",
                "Finance",
            ),
            "student_performance" => (
                "Rapport de Performance Étudiante",
                "Analyse complète des performances académiques",
                "Académique",
            ),
            "teacher_performance" => (
                "Analyse de Performance Enseignant",
                "Analyse d'efficacité pédagogique et feedback étudiant",
                "Ressources Humaines",
            ),
            "attendance_analysis" => (
                "Analyse de Présence",
                "Modèles et tendances de présence des étudiants",
                "Présence",
            ),
            "academic" => (
                "Rapport Académique",
                "Analyse académique complète",
                "Académique",
            ),
            other => {
                return Self {
                    title: title_case(other),
                    description: format!("Rapport généré le {}", created.format("%d/%m/%Y")),
                    category: "Général",
                };
            }
        };
        Self {
            title: title.to_string(),
            description: description.to_string(),
            category,
        }
    }
}

/// `student_performance` -> `Student Performance`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("student_performance"), "Student Performance");
        assert_eq!(title_case("total_revenue"), "Total Revenue");
        assert_eq!(title_case("custom"), "Custom");
    }

    #[test]
    fn test_labels_for_known_and_unknown_types() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let financial = ReportLabels::for_type("financial", date);
        assert_eq!(financial.title, "Rapport Financier");
        assert_eq!(financial.category, "Finance");

        let custom = ReportLabels::for_type("enrollment_trends", date);
        assert_eq!(custom.title, "Enrollment Trends");
        assert_eq!(custom.description, "Rapport généré le 07/03/2025");
        assert_eq!(custom.category, "Général");
    }
}
