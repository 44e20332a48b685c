//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as AttendanceRecords, Model as AttendanceModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::documents::{
    ActiveModel as DocumentActiveModel, Entity as Documents, Model as DocumentModel,
};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::exam_results::{
    ActiveModel as ExamResultActiveModel, Entity as ExamResults, Model as ExamResultModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::feedback::{
    ActiveModel as FeedbackActiveModel, Entity as Feedbacks, Model as FeedbackModel,
};
pub use super::groups::{ActiveModel as GroupActiveModel, Entity as Groups, Model as GroupModel};
pub use super::institution_settings::{
    ActiveModel as SettingsActiveModel, Entity as InstitutionSettings, Model as SettingsModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::reports::{ActiveModel as ReportActiveModel, Entity as Reports, Model as ReportModel};
pub use super::student_grades::{
    ActiveModel as StudentGradeActiveModel, Entity as StudentGrades, Model as StudentGradeModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::subscription_invoices::{
    ActiveModel as InvoiceActiveModel, Entity as SubscriptionInvoices, Model as InvoiceModel,
};
pub use super::subscription_plans::{
    ActiveModel as PlanActiveModel, Entity as SubscriptionPlans, Model as PlanModel,
};
pub use super::subscriptions::{
    ActiveModel as SubscriptionActiveModel, Entity as Subscriptions, Model as SubscriptionModel,
};
pub use super::teacher_statistics::{
    ActiveModel as TeacherStatisticsActiveModel, Entity as TeacherStatistics,
    Model as TeacherStatisticsModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::timetable::{
    ActiveModel as TimetableActiveModel, Entity as TimetableEntries, Model as TimetableModel,
};
pub use super::usage_metrics::{
    ActiveModel as UsageMetricActiveModel, Entity as UsageMetrics, Model as UsageMetricModel,
};
