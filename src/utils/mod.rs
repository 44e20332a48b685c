pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod retry;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAttendanceIdI64, SafeCourseIdI64, SafeDayOfWeek, SafeDocumentIdI64, SafeEventIdI64,
    SafeExamIdI64, SafeFeedbackIdI64, SafeGroupIdI64, SafeInvoiceIdI64,
    SafePaymentIdI64, SafePlanIdI64, SafeStudentIdI64, SafeSubjectIdI64,
    SafeSubscriptionIdI64, SafeTeacherIdI64, SafeTimetableIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use retry::retry_with_backoff;
pub use sql::escape_like_pattern;
