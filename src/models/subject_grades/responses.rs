use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct SubjectAverage {
    pub subject: String,
    pub coefficient: f64,
    pub average: f64,
}

// 学生加权平均分；无任何系数时 average 为 null
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct StudentAverage {
    pub student_id: i64,
    pub full_name: String,
    pub average: Option<f64>,
    pub sum_coefficients: f64,
    pub subjects: Vec<SubjectAverage>,
}
