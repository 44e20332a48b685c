use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    admins::entities::Admin,
    attendance::{
        entities::{Attendance, AttendanceListResponse},
        requests::{AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest},
    },
    courses::{
        entities::{Course, CourseListResponse},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseRef,
    },
    documents::{
        entities::{Document, DocumentListResponse},
        requests::{DocumentListQuery, UpdateDocumentRequest},
    },
    events::{
        entities::{Event, EventListResponse},
        requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
    },
    exams::{
        entities::{Exam, ExamListResponse, ExamResult},
        requests::{CreateExamRequest, ExamListQuery, ExamResultInput, UpdateExamRequest},
    },
    feedback::{entities::Feedback, requests::CreateFeedbackRequest},
    groups::{
        entities::{Group, GroupListResponse},
        requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
    },
    payments::{
        entities::{Payment, PaymentListResponse},
        requests::{PaymentListQuery, UpdatePaymentRequest},
    },
    reports::{
        entities::{Report, ReportListResponse},
        requests::ReportListQuery,
    },
    settings::{entities::InstitutionSettings, requests::UpdateSettingsRequest},
    students::{
        entities::{Student, StudentListResponse},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    subject_grades::{
        entities::StudentGrade,
        requests::{GradeInput, GroupSubjectQuery, StudentGradesQuery},
    },
    subjects::{
        entities::{Subject, SubjectListResponse},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
    subscriptions::{
        entities::{Subscription, SubscriptionInvoice, SubscriptionPlan, UsageMetric},
        requests::{
            CreateInvoiceRequest, CreatePlanRequest, CreateSubscriptionRequest,
            UpdateInvoiceRequest, UpdatePlanRequest, UpdateSubscriptionRequest,
        },
    },
    teachers::{
        entities::{Teacher, TeacherListResponse, TeacherStatistics},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
    timetable::{
        entities::TimetableEntry,
        requests::CreateTimetableRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 新增缴费所需字段（默认值已由业务层补齐）
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub student_id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: Option<String>,
    pub status: String,
}

/// 新增文档所需字段
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub doc_type: String,
    pub student_id: Option<i64>,
    pub file_path: Option<String>,
    pub signed: bool,
    pub meta: Option<serde_json::Value>,
}

/// 报表统计用的聚合值
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaymentTotals {
    pub paid: f64,
    pub unpaid: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttendanceTotals {
    pub total: u64,
    pub present: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportCounters {
    pub total: u64,
    pub generated_today: u64,
    pub pending: u64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 连通性检查（SELECT 1）
    async fn ping(&self) -> Result<()>;

    /// 管理员
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin>;
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>>;
    async fn count_admins(&self) -> Result<u64>;
    async fn update_admin_password(&self, id: i64, password_hash: &str) -> Result<bool>;

    /// 班级
    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group>;
    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>>;
    async fn list_groups_with_pagination(&self, query: GroupListQuery)
    -> Result<GroupListResponse>;
    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>>;
    // 删除班级时置空学生与课程的班级引用
    async fn delete_group(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn list_students_by_group(&self, group_id: i64) -> Result<Vec<Student>>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn count_students(&self) -> Result<u64>;
    async fn count_students_in_groups(&self, group_ids: &[i64]) -> Result<u64>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn list_teacher_ids(&self) -> Result<Vec<i64>>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    async fn count_teachers(&self) -> Result<u64>;
    async fn count_teachers_created_since(&self, timestamp: i64) -> Result<u64>;

    /// 教师统计
    async fn get_teacher_statistics(&self, teacher_id: i64) -> Result<Option<TeacherStatistics>>;
    async fn upsert_teacher_statistics(&self, stats: TeacherStatistics)
    -> Result<TeacherStatistics>;

    /// 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>>;
    async fn list_course_refs(&self) -> Result<Vec<CourseRef>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn count_courses(&self) -> Result<u64>;

    /// 考试
    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams_with_pagination(&self, query: ExamListQuery) -> Result<ExamListResponse>;
    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;
    // 按 (exam_id, student_id) 写入或覆盖
    async fn upsert_exam_results(
        &self,
        exam_id: i64,
        results: Vec<ExamResultInput>,
    ) -> Result<Vec<ExamResult>>;
    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>>;
    // (平均分, 成绩条数)
    async fn exam_score_summary(&self) -> Result<(f64, u64)>;

    /// 考勤
    async fn upsert_attendance(&self, req: CreateAttendanceRequest) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn find_attendance(&self, student_id: i64, date: NaiveDate)
    -> Result<Option<Attendance>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    async fn attendance_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AttendanceTotals>;

    /// 课表
    async fn create_timetable_entry(&self, req: CreateTimetableRequest) -> Result<TimetableEntry>;
    async fn get_timetable_entry(&self, id: i64) -> Result<Option<TimetableEntry>>;
    async fn list_timetable(&self) -> Result<Vec<TimetableEntry>>;
    async fn list_timetable_by_group(&self, group_id: i64) -> Result<Vec<TimetableEntry>>;
    async fn list_timetable_by_day(&self, day_of_week: i32) -> Result<Vec<TimetableEntry>>;
    // 同班级同一天的全部条目，用于冲突检测
    async fn list_timetable_by_group_and_day(
        &self,
        group_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<TimetableEntry>>;
    // 以合并后的完整条目覆盖
    async fn replace_timetable_entry(&self, entry: TimetableEntry) -> Result<Option<TimetableEntry>>;
    async fn delete_timetable_entry(&self, id: i64) -> Result<bool>;

    /// 缴费
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse>;
    async fn update_payment(&self, id: i64, update: UpdatePaymentRequest)
    -> Result<Option<Payment>>;
    async fn set_payment_receipt(&self, id: i64, receipt_path: &str) -> Result<bool>;
    async fn delete_payment(&self, id: i64) -> Result<bool>;
    async fn payment_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PaymentTotals>;

    /// 报表
    async fn create_report(
        &self,
        report_type: &str,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
        file_path: Option<String>,
    ) -> Result<Report>;
    async fn list_reports_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<ReportListResponse>;
    async fn list_recent_reports(&self, limit: u64) -> Result<Vec<Report>>;
    async fn report_counters(&self, today: NaiveDate) -> Result<ReportCounters>;

    /// 文档
    async fn create_document(&self, doc: NewDocument) -> Result<Document>;
    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>>;
    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse>;
    async fn update_document(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>>;
    async fn delete_document(&self, id: i64) -> Result<bool>;

    /// 日程事件
    async fn create_event(&self, req: CreateEventRequest) -> Result<Event>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn list_events_with_pagination(&self, query: EventListQuery)
    -> Result<EventListResponse>;
    async fn list_all_events(&self) -> Result<Vec<Event>>;
    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    /// 科目
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 科目成绩
    async fn upsert_student_grades(&self, grades: Vec<GradeInput>) -> Result<Vec<StudentGrade>>;
    async fn list_grades_by_group_subject(
        &self,
        query: GroupSubjectQuery,
    ) -> Result<Vec<StudentGrade>>;
    async fn list_grades_by_student(&self, query: StudentGradesQuery)
    -> Result<Vec<StudentGrade>>;
    async fn list_grades_by_group_semester(
        &self,
        group_id: i64,
        semester: &str,
    ) -> Result<Vec<StudentGrade>>;

    /// 评价
    // 按 (student_id, teacher_id, course_id) 写入或覆盖
    async fn upsert_feedback(&self, req: CreateFeedbackRequest) -> Result<Feedback>;
    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>>;
    async fn list_feedback(&self, skip: u64, limit: u64) -> Result<Vec<Feedback>>;
    async fn list_feedback_by_teacher(&self, teacher_id: i64) -> Result<Vec<Feedback>>;
    async fn list_feedback_by_course(&self, course_id: i64) -> Result<Vec<Feedback>>;
    async fn delete_feedback(&self, id: i64) -> Result<bool>;

    /// 机构设置
    async fn get_settings(&self) -> Result<Option<InstitutionSettings>>;
    async fn create_default_settings(&self) -> Result<InstitutionSettings>;
    async fn update_settings(
        &self,
        update: UpdateSettingsRequest,
    ) -> Result<Option<InstitutionSettings>>;

    /// 订阅套餐
    async fn create_plan(&self, req: CreatePlanRequest) -> Result<SubscriptionPlan>;
    async fn get_plan_by_id(&self, id: i64) -> Result<Option<SubscriptionPlan>>;
    async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlan>>;
    async fn update_plan(&self, id: i64, update: UpdatePlanRequest)
    -> Result<Option<SubscriptionPlan>>;
    // 软删除：is_active = false
    async fn deactivate_plan(&self, id: i64) -> Result<bool>;

    /// 订阅
    // 订阅与首张待付账单在同一事务内创建
    async fn create_subscription_with_invoice(
        &self,
        admin_id: i64,
        req: CreateSubscriptionRequest,
        invoice_amount: f64,
        invoice_number: &str,
    ) -> Result<(Subscription, SubscriptionInvoice)>;
    async fn get_subscription_by_id(&self, id: i64) -> Result<Option<Subscription>>;
    async fn list_subscriptions_by_admin(&self, admin_id: i64) -> Result<Vec<Subscription>>;
    async fn get_active_subscription(&self, admin_id: i64) -> Result<Option<Subscription>>;
    async fn update_subscription(
        &self,
        id: i64,
        update: UpdateSubscriptionRequest,
    ) -> Result<Option<Subscription>>;
    async fn set_subscription_status_by_stripe_id(
        &self,
        stripe_subscription_id: &str,
        status: &str,
    ) -> Result<bool>;

    /// 订阅账单
    async fn create_invoice(&self, req: CreateInvoiceRequest) -> Result<SubscriptionInvoice>;
    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<SubscriptionInvoice>>;
    async fn list_invoices_by_admin(&self, admin_id: i64) -> Result<Vec<SubscriptionInvoice>>;
    async fn update_invoice(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<SubscriptionInvoice>>;
    async fn set_invoice_status_by_stripe_id(
        &self,
        stripe_invoice_id: &str,
        status: &str,
        paid_date: Option<NaiveDate>,
    ) -> Result<bool>;

    /// 用量记录
    async fn record_usage_metric(
        &self,
        admin_id: i64,
        metric_name: &str,
        metric_value: i64,
    ) -> Result<UsageMetric>;
    async fn list_usage_metrics(&self, admin_id: i64) -> Result<Vec<UsageMetric>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
