//! 路径参数安全提取器
//!
//! 将 `{xxx_id}` 路径段解析为正整数，失败时直接返回统一格式的 400 响应，
//! 避免在每个处理函数中重复校验。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let message = format!("Invalid path parameter '{param}': {raw}");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
            Err(InternalError::from_response(message, response).into())
        }
    }
}

macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeStudentIdI64 => "student_id",
    SafeTeacherIdI64 => "teacher_id",
    SafeGroupIdI64 => "group_id",
    SafeCourseIdI64 => "course_id",
    SafeExamIdI64 => "exam_id",
    SafeAttendanceIdI64 => "attendance_id",
    SafeTimetableIdI64 => "timetable_id",
    SafePaymentIdI64 => "payment_id",
    SafeDocumentIdI64 => "document_id",
    SafeEventIdI64 => "event_id",
    SafeSubjectIdI64 => "subject_id",
    SafeFeedbackIdI64 => "feedback_id",
    SafePlanIdI64 => "plan_id",
    SafeSubscriptionIdI64 => "subscription_id",
    SafeInvoiceIdI64 => "invoice_id",
}

/// 星期参数（0 = 周日 … 6 = 周六），范围校验交给业务层
#[derive(Debug, Clone, Copy)]
pub struct SafeDayOfWeek(pub i32);

impl FromRequest for SafeDayOfWeek {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("day").unwrap_or_default();
        let result = raw.parse::<i32>().map(SafeDayOfWeek).map_err(|_| {
            let message = format!("Invalid day of week: {raw}");
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidDayOfWeek, &message));
            InternalError::from_response(message, response).into()
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_parse_positive_id() {
        let req = TestRequest::default()
            .param("student_id", "42")
            .to_http_request();
        assert_eq!(parse_positive_id(&req, "student_id").unwrap(), 42);
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        let req = TestRequest::default()
            .param("group_id", "0")
            .to_http_request();
        assert!(parse_positive_id(&req, "group_id").is_err());

        let req = TestRequest::default()
            .param("group_id", "abc")
            .to_http_request();
        assert!(parse_positive_id(&req, "group_id").is_err());

        let req = TestRequest::default().to_http_request();
        assert!(parse_positive_id(&req, "group_id").is_err());
    }
}
