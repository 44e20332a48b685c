use serde::Serialize;
use ts_rs::TS;

use super::entities::TeacherStatistics;

// 教师详情页统计卡片
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherStatsResponse {
    pub students: i32,
    pub subjects: i32,
    pub experience: i32,
    pub satisfaction: f64,
    pub attendance: f64,
    pub grade_improvement: f64,
    pub feedback_count: i32,
    pub average_rating: f64,
    pub teaching_quality: f64,
    pub course_content: f64,
    pub communication: f64,
    pub helpfulness: f64,
}

impl From<TeacherStatistics> for TeacherStatsResponse {
    fn from(stats: TeacherStatistics) -> Self {
        Self {
            students: stats.total_students,
            subjects: stats.total_subjects,
            experience: stats.years_experience,
            satisfaction: stats.satisfaction_score,
            attendance: stats.attendance_rate,
            grade_improvement: stats.grade_improvement,
            feedback_count: stats.total_feedback_count,
            average_rating: stats.average_rating,
            teaching_quality: stats.teaching_quality,
            course_content: stats.course_content_rating,
            communication: stats.communication_rating,
            helpfulness: stats.helpfulness_rating,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherOverviewResponse {
    pub total_teachers: i64,
    pub active_teachers: i64,
    pub on_leave: i64,
    pub new_this_month: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateStatsResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateAllStatsResponse {
    pub message: String,
    pub updated_count: i64,
}
