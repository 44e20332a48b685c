use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

pub const COURSE_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
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
    pub status: String,
    pub level: Option<String>,
    pub prerequisites: Option<String>,
    pub objectives: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type CourseListResponse = PaginatedResponse<Course>;
