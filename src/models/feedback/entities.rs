use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生对教师课程的评价，(student_id, teacher_id, course_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct Feedback {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub rating: i32,             // 1-5
    pub satisfaction_score: i32, // 1-10
    pub teaching_quality: i32,
    pub course_content: i32,
    pub communication: i32,
    pub helpfulness: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
