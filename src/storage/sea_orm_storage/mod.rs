//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academics;
mod admins;
mod attendance;
mod billing;
mod courses;
mod documents;
mod events;
mod feedback;
mod groups;
mod payments;
mod reports;
mod schema_patch;
mod settings;
mod students;
mod teachers;
mod timetable;

use crate::config::AppConfig;
use crate::errors::{EduManageError, Result};
use crate::models::{PaginatedResponse, PaginationInfo};
use crate::utils::retry_with_backoff;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, Select,
};
use std::time::Duration;
use tracing::info;
use ts_rs::TS;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 连接失败按指数退避重试
        let url = db_url.as_str();
        let db = retry_with_backoff(
            "数据库连接",
            config.database.connect_retries,
            Duration::from_millis(config.database.retry_delay_ms),
            move || async move {
                if url.starts_with("sqlite://") {
                    Self::connect_sqlite(url, config).await
                } else {
                    Self::connect_generic(url, config).await
                }
            },
        )
        .await?;

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 在已有连接上运行迁移与旧表结构补丁
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EduManageError::database_operation(format!("数据库迁移失败: {e}")))?;

        schema_patch::apply_legacy_column_patches(&db).await;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EduManageError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EduManageError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| EduManageError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite::memory:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EduManageError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 通用分页查询
    pub(crate) async fn paginate<E, T>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
        what: &str,
        convert: impl Fn(E::Model) -> T,
    ) -> Result<PaginatedResponse<T>>
    where
        E: EntityTrait,
        E::Model: FromQueryResult + Sized + Send + Sync,
        T: TS,
    {
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询{what}总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询{what}页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询{what}列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: rows.into_iter().map(convert).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub(crate) async fn ping_impl(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| EduManageError::database_connection(format!("数据库不可用: {e}")))?;
        Ok(())
    }
}

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
use crate::storage::{
    AttendanceTotals, NewDocument, NewPayment, PaymentTotals, ReportCounters, Storage,
};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin> {
        self.create_admin_impl(username, password_hash).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.get_admin_by_username_impl(username).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn update_admin_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_admin_password_impl(id, password_hash).await
    }

    async fn create_group(&self, req: CreateGroupRequest) -> Result<Group> {
        self.create_group_impl(req).await
    }

    async fn get_group_by_id(&self, id: i64) -> Result<Option<Group>> {
        self.get_group_by_id_impl(id).await
    }

    async fn list_groups_with_pagination(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        self.list_groups_with_pagination_impl(query).await
    }

    async fn update_group(&self, id: i64, update: UpdateGroupRequest) -> Result<Option<Group>> {
        self.update_group_impl(id, update).await
    }

    async fn delete_group(&self, id: i64) -> Result<bool> {
        self.delete_group_impl(id).await
    }

    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_by_group(&self, group_id: i64) -> Result<Vec<Student>> {
        self.list_students_by_group_impl(group_id).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    async fn count_students_in_groups(&self, group_ids: &[i64]) -> Result<u64> {
        self.count_students_in_groups_impl(group_ids).await
    }

    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn list_teacher_ids(&self) -> Result<Vec<i64>> {
        self.list_teacher_ids_impl().await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn count_teachers(&self) -> Result<u64> {
        self.count_teachers_impl().await
    }

    async fn count_teachers_created_since(&self, timestamp: i64) -> Result<u64> {
        self.count_teachers_created_since_impl(timestamp).await
    }

    async fn get_teacher_statistics(&self, teacher_id: i64) -> Result<Option<TeacherStatistics>> {
        self.get_teacher_statistics_impl(teacher_id).await
    }

    async fn upsert_teacher_statistics(
        &self,
        stats: TeacherStatistics,
    ) -> Result<TeacherStatistics> {
        self.upsert_teacher_statistics_impl(stats).await
    }

    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_courses_by_teacher(&self, teacher_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_teacher_impl(teacher_id).await
    }

    async fn list_course_refs(&self) -> Result<Vec<CourseRef>> {
        self.list_course_refs_impl().await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    async fn create_exam(&self, req: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(req).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams_with_pagination(&self, query: ExamListQuery) -> Result<ExamListResponse> {
        self.list_exams_with_pagination_impl(query).await
    }

    async fn update_exam(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        self.update_exam_impl(id, update).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    async fn upsert_exam_results(
        &self,
        exam_id: i64,
        results: Vec<ExamResultInput>,
    ) -> Result<Vec<ExamResult>> {
        self.upsert_exam_results_impl(exam_id, results).await
    }

    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        self.list_exam_results_impl(exam_id).await
    }

    async fn exam_score_summary(&self) -> Result<(f64, u64)> {
        self.exam_score_summary_impl().await
    }

    async fn upsert_attendance(&self, req: CreateAttendanceRequest) -> Result<Attendance> {
        self.upsert_attendance_impl(req).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn find_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        self.find_attendance_impl(student_id, date).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn attendance_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AttendanceTotals> {
        self.attendance_totals_impl(from, to).await
    }

    async fn create_timetable_entry(&self, req: CreateTimetableRequest) -> Result<TimetableEntry> {
        self.create_timetable_entry_impl(req).await
    }

    async fn get_timetable_entry(&self, id: i64) -> Result<Option<TimetableEntry>> {
        self.get_timetable_entry_impl(id).await
    }

    async fn list_timetable(&self) -> Result<Vec<TimetableEntry>> {
        self.list_timetable_impl().await
    }

    async fn list_timetable_by_group(&self, group_id: i64) -> Result<Vec<TimetableEntry>> {
        self.list_timetable_by_group_impl(group_id).await
    }

    async fn list_timetable_by_day(&self, day_of_week: i32) -> Result<Vec<TimetableEntry>> {
        self.list_timetable_by_day_impl(day_of_week).await
    }

    async fn list_timetable_by_group_and_day(
        &self,
        group_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<TimetableEntry>> {
        self.list_timetable_by_group_and_day_impl(group_id, day_of_week).await
    }

    async fn replace_timetable_entry(
        &self,
        entry: TimetableEntry,
    ) -> Result<Option<TimetableEntry>> {
        self.replace_timetable_entry_impl(entry).await
    }

    async fn delete_timetable_entry(&self, id: i64) -> Result<bool> {
        self.delete_timetable_entry_impl(id).await
    }

    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.create_payment_impl(payment).await
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaymentListResponse> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        self.update_payment_impl(id, update).await
    }

    async fn set_payment_receipt(&self, id: i64, receipt_path: &str) -> Result<bool> {
        self.set_payment_receipt_impl(id, receipt_path).await
    }

    async fn delete_payment(&self, id: i64) -> Result<bool> {
        self.delete_payment_impl(id).await
    }

    async fn payment_totals(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PaymentTotals> {
        self.payment_totals_impl(from, to).await
    }

    async fn create_report(
        &self,
        report_type: &str,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
        file_path: Option<String>,
    ) -> Result<Report> {
        self.create_report_impl(report_type, period_start, period_end, file_path).await
    }

    async fn list_reports_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<ReportListResponse> {
        self.list_reports_with_pagination_impl(query).await
    }

    async fn list_recent_reports(&self, limit: u64) -> Result<Vec<Report>> {
        self.list_recent_reports_impl(limit).await
    }

    async fn report_counters(&self, today: NaiveDate) -> Result<ReportCounters> {
        self.report_counters_impl(today).await
    }

    async fn create_document(&self, doc: NewDocument) -> Result<Document> {
        self.create_document_impl(doc).await
    }

    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>> {
        self.get_document_by_id_impl(id).await
    }

    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        self.list_documents_with_pagination_impl(query).await
    }

    async fn update_document(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        self.update_document_impl(id, update).await
    }

    async fn delete_document(&self, id: i64) -> Result<bool> {
        self.delete_document_impl(id).await
    }

    async fn create_event(&self, req: CreateEventRequest) -> Result<Event> {
        self.create_event_impl(req).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        self.list_events_with_pagination_impl(query).await
    }

    async fn list_all_events(&self) -> Result<Vec<Event>> {
        self.list_all_events_impl().await
    }

    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>> {
        self.update_event_impl(id, update).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn upsert_student_grades(&self, grades: Vec<GradeInput>) -> Result<Vec<StudentGrade>> {
        self.upsert_student_grades_impl(grades).await
    }

    async fn list_grades_by_group_subject(
        &self,
        query: GroupSubjectQuery,
    ) -> Result<Vec<StudentGrade>> {
        self.list_grades_by_group_subject_impl(query).await
    }

    async fn list_grades_by_student(&self, query: StudentGradesQuery) -> Result<Vec<StudentGrade>> {
        self.list_grades_by_student_impl(query).await
    }

    async fn list_grades_by_group_semester(
        &self,
        group_id: i64,
        semester: &str,
    ) -> Result<Vec<StudentGrade>> {
        self.list_grades_by_group_semester_impl(group_id, semester).await
    }

    async fn upsert_feedback(&self, req: CreateFeedbackRequest) -> Result<Feedback> {
        self.upsert_feedback_impl(req).await
    }

    async fn get_feedback_by_id(&self, id: i64) -> Result<Option<Feedback>> {
        self.get_feedback_by_id_impl(id).await
    }

    async fn list_feedback(&self, skip: u64, limit: u64) -> Result<Vec<Feedback>> {
        self.list_feedback_impl(skip, limit).await
    }

    async fn list_feedback_by_teacher(&self, teacher_id: i64) -> Result<Vec<Feedback>> {
        self.list_feedback_by_teacher_impl(teacher_id).await
    }

    async fn list_feedback_by_course(&self, course_id: i64) -> Result<Vec<Feedback>> {
        self.list_feedback_by_course_impl(course_id).await
    }

    async fn delete_feedback(&self, id: i64) -> Result<bool> {
        self.delete_feedback_impl(id).await
    }

    async fn get_settings(&self) -> Result<Option<InstitutionSettings>> {
        self.get_settings_impl().await
    }

    async fn create_default_settings(&self) -> Result<InstitutionSettings> {
        self.create_default_settings_impl().await
    }

    async fn update_settings(
        &self,
        update: UpdateSettingsRequest,
    ) -> Result<Option<InstitutionSettings>> {
        self.update_settings_impl(update).await
    }

    async fn create_plan(&self, req: CreatePlanRequest) -> Result<SubscriptionPlan> {
        self.create_plan_impl(req).await
    }

    async fn get_plan_by_id(&self, id: i64) -> Result<Option<SubscriptionPlan>> {
        self.get_plan_by_id_impl(id).await
    }

    async fn list_active_plans(&self) -> Result<Vec<SubscriptionPlan>> {
        self.list_active_plans_impl().await
    }

    async fn update_plan(
        &self,
        id: i64,
        update: UpdatePlanRequest,
    ) -> Result<Option<SubscriptionPlan>> {
        self.update_plan_impl(id, update).await
    }

    async fn deactivate_plan(&self, id: i64) -> Result<bool> {
        self.deactivate_plan_impl(id).await
    }

    async fn create_subscription_with_invoice(
        &self,
        admin_id: i64,
        req: CreateSubscriptionRequest,
        invoice_amount: f64,
        invoice_number: &str,
    ) -> Result<(Subscription, SubscriptionInvoice)> {
        self.create_subscription_with_invoice_impl(
            admin_id,
            req,
            invoice_amount,
            invoice_number,
        )
        .await
    }

    async fn get_subscription_by_id(&self, id: i64) -> Result<Option<Subscription>> {
        self.get_subscription_by_id_impl(id).await
    }

    async fn list_subscriptions_by_admin(&self, admin_id: i64) -> Result<Vec<Subscription>> {
        self.list_subscriptions_by_admin_impl(admin_id).await
    }

    async fn get_active_subscription(&self, admin_id: i64) -> Result<Option<Subscription>> {
        self.get_active_subscription_impl(admin_id).await
    }

    async fn update_subscription(
        &self,
        id: i64,
        update: UpdateSubscriptionRequest,
    ) -> Result<Option<Subscription>> {
        self.update_subscription_impl(id, update).await
    }

    async fn set_subscription_status_by_stripe_id(
        &self,
        stripe_subscription_id: &str,
        status: &str,
    ) -> Result<bool> {
        self.set_subscription_status_by_stripe_id_impl(stripe_subscription_id, status).await
    }

    async fn create_invoice(&self, req: CreateInvoiceRequest) -> Result<SubscriptionInvoice> {
        self.create_invoice_impl(req).await
    }

    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<SubscriptionInvoice>> {
        self.get_invoice_by_id_impl(id).await
    }

    async fn list_invoices_by_admin(&self, admin_id: i64) -> Result<Vec<SubscriptionInvoice>> {
        self.list_invoices_by_admin_impl(admin_id).await
    }

    async fn update_invoice(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<SubscriptionInvoice>> {
        self.update_invoice_impl(id, update).await
    }

    async fn set_invoice_status_by_stripe_id(
        &self,
        stripe_invoice_id: &str,
        status: &str,
        paid_date: Option<NaiveDate>,
    ) -> Result<bool> {
        self.set_invoice_status_by_stripe_id_impl(stripe_invoice_id, status, paid_date).await
    }

    async fn record_usage_metric(
        &self,
        admin_id: i64,
        metric_name: &str,
        metric_value: i64,
    ) -> Result<UsageMetric> {
        self.record_usage_metric_impl(admin_id, metric_name, metric_value).await
    }

    async fn list_usage_metrics(&self, admin_id: i64) -> Result<Vec<UsageMetric>> {
        self.list_usage_metrics_impl(admin_id).await
    }
}

/// 归一化分页参数：page 从 1 开始，size 限制在 1..=100
pub(crate) fn page_params(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    (
        page.unwrap_or(1).max(1) as u64,
        size.unwrap_or(10).clamp(1, 100) as u64,
    )
}

/// 当前 Unix 时间戳（秒）
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use sea_orm::Database;

    /// 内存 SQLite，已运行迁移
    pub async fn memory_storage() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        SeaOrmStorage::from_connection(db)
            .await
            .expect("run migrations")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("data/school.db").unwrap(),
            "sqlite://data/school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/edu").unwrap(),
            "postgres://u:p@localhost/edu"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_page_params_are_clamped() {
        assert_eq!(page_params(None, None), (1, 10));
        assert_eq!(page_params(Some(0), Some(500)), (1, 100));
        assert_eq!(page_params(Some(3), Some(0)), (3, 1));
    }

    #[tokio::test]
    async fn test_ping_on_memory_database() {
        let storage = test_support::memory_storage().await;
        assert!(storage.ping_impl().await.is_ok());
    }
}
