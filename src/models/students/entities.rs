use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

pub const STUDENT_STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub group_id: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>, // M / F
    pub status: String,         // active / inactive / graduated
    pub created_at: DateTime<Utc>,
}

pub type StudentListResponse = PaginatedResponse<Student>;
