use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub course_id: i64,
    pub group_id: i64,
    pub exam_date: NaiveDate,
    pub max_score: f64,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub course_id: Option<i64>,
    pub group_id: Option<i64>,
    pub exam_date: Option<NaiveDate>,
    pub max_score: Option<f64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub group_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamResultInput {
    pub student_id: i64,
    pub score: f64,
}

// 批量录入成绩
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct SubmitExamResultsRequest {
    pub results: Vec<ExamResultInput>,
}
