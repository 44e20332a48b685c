//! 教师统计聚合
//!
//! 基于课程、学生与评价计算教师统计并写回 teacher_statistics，
//! 评价写入或删除后重算。

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::feedback::entities::Feedback;
use crate::models::feedback::responses::TeacherFeedbackStats;
use crate::models::teachers::entities::TeacherStatistics;
use crate::storage::Storage;

/// 出勤率暂无数据来源，固定值
pub const DEFAULT_ATTENDANCE_RATE: f64 = 85.0;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(feedback: &[Feedback], field: impl Fn(&Feedback) -> i32) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }
    feedback.iter().map(|f| field(f) as f64).sum::<f64>() / feedback.len() as f64
}

/// 评价汇总，保留两位小数，无评价时全部为 0
pub fn summarize_feedback(feedback: &[Feedback]) -> TeacherFeedbackStats {
    TeacherFeedbackStats {
        average_rating: round2(mean(feedback, |f| f.rating)),
        total_feedbacks: feedback.len() as i64,
        satisfaction_score: round2(mean(feedback, |f| f.satisfaction_score)),
        teaching_quality: round2(mean(feedback, |f| f.teaching_quality)),
        course_content: round2(mean(feedback, |f| f.course_content)),
        communication: round2(mean(feedback, |f| f.communication)),
        helpfulness: round2(mean(feedback, |f| f.helpfulness)),
    }
}

/// 汇总输入
pub struct StatsInput<'a> {
    pub teacher_id: i64,
    pub total_subjects: usize,
    pub total_students: u64,
    pub joined_year: i32,
    pub current_year: i32,
    pub feedback: &'a [Feedback],
}

pub fn build_statistics(input: StatsInput<'_>) -> TeacherStatistics {
    let feedback = input.feedback;
    let avg_satisfaction = mean(feedback, |f| f.satisfaction_score);
    let avg_teaching_quality = mean(feedback, |f| f.teaching_quality);

    TeacherStatistics {
        teacher_id: input.teacher_id,
        total_students: input.total_students as i32,
        total_subjects: input.total_subjects as i32,
        years_experience: (input.current_year - input.joined_year).max(0),
        // 满意度 1-10 映射为百分比
        satisfaction_score: round2(avg_satisfaction / 10.0 * 100.0),
        average_rating: round2(mean(feedback, |f| f.rating)),
        total_feedback_count: feedback.len() as i32,
        teaching_quality: round2(avg_teaching_quality),
        course_content_rating: round2(mean(feedback, |f| f.course_content)),
        communication_rating: round2(mean(feedback, |f| f.communication)),
        helpfulness_rating: round2(mean(feedback, |f| f.helpfulness)),
        attendance_rate: DEFAULT_ATTENDANCE_RATE,
        // 教学质量 1-5 映射为百分比
        grade_improvement: round2(avg_teaching_quality / 5.0 * 100.0),
    }
}

/// 重新计算并写回；教师不存在时返回 None
pub async fn refresh_teacher_statistics(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<Option<TeacherStatistics>> {
    let Some(teacher) = storage.get_teacher_by_id(teacher_id).await? else {
        return Ok(None);
    };

    let courses = storage.list_courses_by_teacher(teacher_id).await?;
    let group_ids: Vec<i64> = courses.iter().filter_map(|c| c.group_id).collect();
    let total_students = storage.count_students_in_groups(&group_ids).await?;
    let feedback = storage.list_feedback_by_teacher(teacher_id).await?;

    let stats = build_statistics(StatsInput {
        teacher_id,
        total_subjects: courses.len(),
        total_students,
        joined_year: teacher.created_at.year(),
        current_year: Utc::now().year(),
        feedback: &feedback,
    });
    debug!("Computed statistics for teacher {}: {:?}", teacher_id, stats);

    let saved = storage.upsert_teacher_statistics(stats).await?;
    Ok(Some(saved))
}

/// 评价变更后的重算，失败只记日志
pub async fn refresh_after_feedback(storage: &Arc<dyn Storage>, teacher_id: i64) {
    if let Err(e) = refresh_teacher_statistics(storage, teacher_id).await {
        warn!(
            "Failed to refresh statistics for teacher {}: {}",
            teacher_id, e
        );
    }
}

/// 重算全部教师，返回成功数量
pub async fn refresh_all_teacher_statistics(storage: &Arc<dyn Storage>) -> Result<i64> {
    let ids = storage.list_teacher_ids().await?;
    let total = ids.len();
    let mut updated = 0;
    for id in ids {
        match refresh_teacher_statistics(storage, id).await {
            Ok(Some(_)) => updated += 1,
            Ok(None) => {}
            Err(e) => warn!("Failed to refresh statistics for teacher {}: {}", id, e),
        }
    }
    info!("Updated statistics for {}/{} teachers", updated, total);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn feedback(rating: i32, satisfaction: i32, quality: i32) -> Feedback {
        Feedback {
            id: 0,
            student_id: 1,
            teacher_id: 1,
            course_id: 1,
            rating,
            satisfaction_score: satisfaction,
            teaching_quality: quality,
            course_content: 4,
            communication: 3,
            helpfulness: 5,
            comments: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }

    #[test]
    fn test_empty_feedback_gives_zeros() {
        let stats = build_statistics(StatsInput {
            teacher_id: 9,
            total_subjects: 2,
            total_students: 30,
            joined_year: 2020,
            current_year: 2025,
            feedback: &[],
        });
        assert_eq!(stats.total_subjects, 2);
        assert_eq!(stats.total_students, 30);
        assert_eq!(stats.years_experience, 5);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.satisfaction_score, 0.0);
        assert_eq!(stats.grade_improvement, 0.0);
        assert_eq!(stats.attendance_rate, 85.0);
        assert_eq!(stats.total_feedback_count, 0);

        assert_eq!(summarize_feedback(&[]), TeacherFeedbackStats::default());
    }

    #[test]
    fn test_percent_mappings() {
        let items = vec![feedback(5, 9, 4), feedback(4, 8, 5)];
        let stats = build_statistics(StatsInput {
            teacher_id: 1,
            total_subjects: 1,
            total_students: 0,
            joined_year: 2030,
            current_year: 2025,
            feedback: &items,
        });
        assert_eq!(stats.years_experience, 0);
        assert_eq!(stats.average_rating, 4.5);
        assert_eq!(stats.satisfaction_score, 85.0);
        assert_eq!(stats.teaching_quality, 4.5);
        assert_eq!(stats.grade_improvement, 90.0);
        assert_eq!(stats.total_feedback_count, 2);
    }

    #[test]
    fn test_summarize_feedback_rounds() {
        let items = vec![feedback(5, 7, 4), feedback(4, 8, 4), feedback(4, 8, 5)];
        let summary = summarize_feedback(&items);
        assert_eq!(summary.total_feedbacks, 3);
        assert_eq!(summary.average_rating, 4.33);
        assert_eq!(summary.satisfaction_score, 7.67);
        assert_eq!(summary.teaching_quality, 4.33);
    }
}
