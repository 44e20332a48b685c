use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 科目成绩，(student_id, subject, exam_name, semester) 唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct StudentGrade {
    pub id: i64,
    pub student_id: i64,
    pub group_id: i64,
    pub subject: String,
    pub exam_name: String,
    pub grade: f64,
    pub coefficient: Option<f64>,
    pub semester: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
