use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub teacher_id: Option<i64>,
    pub group_id: Option<i64>,
    pub max_students: Option<i32>,
    pub fee: Option<f64>,
    pub duration: Option<String>,
    pub schedule: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub level: Option<String>,
    pub prerequisites: Option<String>,
    pub objectives: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub teacher_id: Option<i64>,
    pub group_id: Option<i64>,
    pub max_students: Option<i32>,
    pub fee: Option<f64>,
    pub duration: Option<String>,
    pub schedule: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub level: Option<String>,
    pub prerequisites: Option<String>,
    pub objectives: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub group_id: Option<i64>,
    pub search: Option<String>,
}
