use serde::Serialize;
use ts_rs::TS;

use super::entities::Course;
use crate::models::groups::entities::Group;

// 课程详情（附带所属班级）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: Course,
    pub group: Option<Group>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseRef {
    pub id: i64,
    pub name: String,
}

// 课程存在性校验：存在时返回课程，否则返回可选课程列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseValidationResponse {
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Course>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_courses: Option<Vec<CourseRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
