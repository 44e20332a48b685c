use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct GradeInput {
    pub student_id: i64,
    pub group_id: i64,
    pub subject: String,
    pub exam_name: String,
    pub grade: f64,
    pub coefficient: Option<f64>,
    pub semester: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct BulkGradesRequest {
    #[serde(default)]
    pub grades: Vec<GradeInput>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct GroupSubjectQuery {
    pub group_id: i64,
    pub subject: String,
    pub semester: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct StudentGradesQuery {
    pub student_id: i64,
    pub semester: Option<String>,
    pub group_id: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject_grade.ts")]
pub struct GroupAveragesQuery {
    pub group_id: i64,
    pub semester: String,
}
