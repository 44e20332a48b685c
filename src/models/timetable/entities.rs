use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课表条目，day_of_week：0 = 周日 … 6 = 周六
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableEntry {
    pub id: i64,
    pub group_id: i64,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/timetable.ts")]
pub struct TimetableMessageResponse {
    pub message: String,
}
