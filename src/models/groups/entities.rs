use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginatedResponse;

// 班级（学生分组）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/group.ts")]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub level: Option<String>, // 年级/层次
    pub year: Option<i32>,     // 学年
    pub capacity: Option<i32>, // 容量
    pub created_at: DateTime<Utc>,
}

pub type GroupListResponse = PaginatedResponse<Group>;
