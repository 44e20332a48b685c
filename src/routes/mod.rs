pub mod attendance;

pub mod auth;

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

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use documents::configure_documents_routes;
pub use events::configure_events_routes;
pub use exams::configure_exams_routes;
pub use feedback::configure_feedback_routes;
pub use groups::configure_groups_routes;
pub use payments::configure_payments_routes;
pub use reports::configure_reports_routes;
pub use settings::configure_settings_routes;
pub use students::configure_students_routes;
pub use subject_grades::configure_subject_grades_routes;
pub use subjects::configure_subjects_routes;
pub use subscriptions::configure_subscriptions_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teachers_routes;
pub use timetable::configure_timetable_routes;

#[cfg(test)]
pub(crate) mod test_support;
