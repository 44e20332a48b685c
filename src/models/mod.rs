pub mod admins;
pub mod attendance;
pub mod common;
pub mod courses;
pub mod documents;
pub mod events;
pub mod exams;
pub mod feedback;
pub mod groups;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod students;
pub mod subject_grades;
pub mod subjects;
pub mod subscriptions;
pub mod system;
pub mod teachers;
pub mod timetable;

pub use common::{
    ApiResponse, ErrorCode, OkResponse, PaginatedResponse, PaginationInfo, PaginationQuery,
};

/// 进程启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
