use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct TeacherFeedbackStats {
    pub average_rating: f64,
    pub total_feedbacks: i64,
    pub satisfaction_score: f64,
    pub teaching_quality: f64,
    pub course_content: f64,
    pub communication: f64,
    pub helpfulness: f64,
}
