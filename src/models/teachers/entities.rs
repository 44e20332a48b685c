use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub speciality: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub type TeacherListResponse = PaginatedResponse<Teacher>;

/// 教师统计（反范式化存储，评价写入后重算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherStatistics {
    pub teacher_id: i64,
    pub total_students: i32,
    pub total_subjects: i32,
    pub years_experience: i32,
    pub satisfaction_score: f64, // 0-100
    pub average_rating: f64,     // 1-5
    pub total_feedback_count: i32,
    pub teaching_quality: f64,
    pub course_content_rating: f64,
    pub communication_rating: f64,
    pub helpfulness_rating: f64,
    pub attendance_rate: f64,
    pub grade_improvement: f64, // 0-100
}
