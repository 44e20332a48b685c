//! 各类型报表的统计项

use serde_json::{Map, Value, json};

use crate::models::feedback::responses::TeacherFeedbackStats;
use crate::storage::{AttendanceTotals, PaymentTotals};

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

pub fn financial(totals: &PaymentTotals) -> Map<String, Value> {
    let mut stats = Map::new();
    stats.insert("total_revenue".into(), json!(round_to(totals.paid, 2)));
    stats.insert("outstanding_balances".into(), json!(round_to(totals.unpaid, 2)));
    stats.insert(
        "recovery_rate_percent".into(),
        json!(round_to(percent(totals.paid, totals.paid + totals.unpaid), 1)),
    );
    stats
}

pub fn attendance(totals: &AttendanceTotals) -> Map<String, Value> {
    let mut stats = Map::new();
    stats.insert("attendance_records".into(), json!(totals.total));
    stats.insert(
        "present_rate_percent".into(),
        json!(round_to(percent(totals.present as f64, totals.total as f64), 1)),
    );
    stats
}

pub fn student_performance(avg_score: f64, results_count: u64) -> Map<String, Value> {
    let mut stats = Map::new();
    stats.insert("avg_score".into(), json!(round_to(avg_score, 2)));
    stats.insert("results_count".into(), json!(results_count));
    stats
}

pub fn teacher_performance(summary: &TeacherFeedbackStats) -> Map<String, Value> {
    let mut stats = Map::new();
    stats.insert("feedback_count".into(), json!(summary.total_feedbacks));
    stats.insert("average_rating".into(), json!(summary.average_rating));
    stats
}

pub fn basic() -> Map<String, Value> {
    let mut stats = Map::new();
    stats.insert("note".into(), json!("Basic report generated"));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_rates() {
        let stats = financial(&PaymentTotals {
            paid: 5000.0,
            unpaid: 1000.0,
        });
        assert_eq!(stats["total_revenue"], json!(5000.0));
        assert_eq!(stats["outstanding_balances"], json!(1000.0));
        assert_eq!(stats["recovery_rate_percent"], json!(83.3));
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let stats = financial(&PaymentTotals::default());
        assert_eq!(stats["recovery_rate_percent"], json!(0.0));

        let stats = attendance(&AttendanceTotals::default());
        assert_eq!(stats["attendance_records"], json!(0));
        assert_eq!(stats["present_rate_percent"], json!(0.0));
    }

    #[test]
    fn test_attendance_and_scores() {
        let stats = attendance(&AttendanceTotals {
            total: 3,
            present: 2,
        });
        assert_eq!(stats["present_rate_percent"], json!(66.7));

        let stats = student_performance(14.256, 12);
        assert_eq!(stats["avg_score"], json!(14.26));
        assert_eq!(stats["results_count"], json!(12));
    }

    #[test]
    fn test_basic_note() {
        assert_eq!(basic()["note"], json!("Basic report generated"));
    }
}
