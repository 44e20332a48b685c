pub mod attendance;
pub mod auth;
pub mod courses;
pub mod documents;
pub mod events;
pub mod exams;
pub mod feedback;
pub mod groups;
pub mod payment_gateway;
pub mod payments;
pub mod reports;
pub mod settings;
pub mod students;
pub mod subject_grades;
pub mod subjects;
pub mod subscriptions;
pub mod system;
pub mod teacher_stats;
pub mod teachers;
pub mod timetable;
pub mod usage;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use documents::DocumentService;
pub use events::EventService;
pub use exams::ExamService;
pub use feedback::FeedbackService;
pub use groups::GroupService;
pub use payments::PaymentService;
pub use reports::ReportService;
pub use settings::SettingsService;
pub use students::StudentService;
pub use subject_grades::SubjectGradeService;
pub use subjects::SubjectService;
pub use subscriptions::SubscriptionService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use timetable::TimetableService;
