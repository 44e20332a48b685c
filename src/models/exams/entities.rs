use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub course_id: i64,
    pub group_id: i64,
    pub exam_date: NaiveDate,
    pub max_score: f64,
}

pub type ExamListResponse = PaginatedResponse<Exam>;

// 单个学生的考试成绩，(exam_id, student_id) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub score: f64,
}
