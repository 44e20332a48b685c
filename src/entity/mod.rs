//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod admins;
pub mod attendance;
pub mod courses;
pub mod documents;
pub mod events;
pub mod exam_results;
pub mod exams;
pub mod feedback;
pub mod groups;
pub mod institution_settings;
pub mod payments;
pub mod reports;
pub mod student_grades;
pub mod students;
pub mod subjects;
pub mod subscription_invoices;
pub mod subscription_plans;
pub mod subscriptions;
pub mod teacher_statistics;
pub mod teachers;
pub mod timetable;
pub mod usage_metrics;
