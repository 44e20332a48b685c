/// 业务错误码
///
/// 1xxx 通用，2xxx 认证，3xxx 教务，4xxx 订阅计费
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    ServiceUnavailable = 1503,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UsernameAlreadyExists = 2002,
    UsernameInvalid = 2003,
    PasswordInvalid = 2004,
    OldPasswordIncorrect = 2005,
    AdminNotFound = 2006,

    StudentNotFound = 3000,
    TeacherNotFound = 3001,
    GroupNotFound = 3002,
    CourseNotFound = 3003,
    ExamNotFound = 3004,
    AttendanceNotFound = 3005,
    TimetableNotFound = 3006,
    PaymentNotFound = 3007,
    ReceiptNotFound = 3008,
    DocumentNotFound = 3009,
    EventNotFound = 3010,
    SubjectNotFound = 3011,
    SubjectAlreadyExists = 3012,
    FeedbackNotFound = 3013,
    SettingsNotFound = 3014,
    ContactInvalid = 3015,
    TimeConflict = 3020,
    InvalidDayOfWeek = 3021,
    InvalidTimeRange = 3022,
    FeedbackScoreOutOfRange = 3024,
    AttendanceConflict = 3025,
    DocumentRenderFailed = 3030,
    StorageFileNotFound = 3031,

    PlanNotFound = 4000,
    InvalidSubscriptionPlan = 4001,
    SubscriptionNotFound = 4002,
    InvoiceNotFound = 4003,
    SubscriptionLimitExceeded = 4004,
    WebhookSignatureMissing = 4005,
    WebhookSignatureInvalid = 4006,
    PaymentGatewayError = 4007,
    MetricForbidden = 4008,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::TimeConflict as i32, 3020);
        assert_eq!(ErrorCode::AttendanceConflict as i32, 3025);
        assert_eq!(ErrorCode::SubscriptionLimitExceeded as i32, 4004);
    }
}
