use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 管理员表
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 班级（学生分组）表
        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Groups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::Level).string().null())
                    .col(ColumnDef::new(Groups::Year).integer().null())
                    .col(ColumnDef::new(Groups::Capacity).integer().null())
                    .col(ColumnDef::new(Groups::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 教师表
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::FullName).string().not_null())
                    .col(ColumnDef::new(Teachers::Speciality).string().null())
                    .col(ColumnDef::new(Teachers::Email).string().null())
                    .col(ColumnDef::new(Teachers::Phone).string().null())
                    .col(
                        ColumnDef::new(Teachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FullName).string().not_null())
                    .col(ColumnDef::new(Students::GroupId).big_integer().null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Address).string().null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().null())
                    .col(ColumnDef::new(Students::Gender).string_len(1).null())
                    .col(
                        ColumnDef::new(Students::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::Category).string().null())
                    .col(ColumnDef::new(Courses::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Courses::GroupId).big_integer().null())
                    .col(ColumnDef::new(Courses::MaxStudents).integer().null())
                    .col(ColumnDef::new(Courses::Fee).double().null())
                    .col(ColumnDef::new(Courses::Duration).string().null())
                    .col(ColumnDef::new(Courses::Schedule).string().null())
                    .col(ColumnDef::new(Courses::StartDate).date().null())
                    .col(ColumnDef::new(Courses::EndDate).date().null())
                    .col(
                        ColumnDef::new(Courses::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Courses::Level).string().null())
                    .col(ColumnDef::new(Courses::Prerequisites).text().null())
                    .col(ColumnDef::new(Courses::Objectives).text().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::ExamDate).date().not_null())
                    .col(ColumnDef::new(Exams::MaxScore).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试成绩表
        manager
            .create_table(
                Table::create()
                    .table(ExamResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamResults::ExamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ExamResults::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamResults::Score).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamResults::Table, ExamResults::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attendance::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string_len(10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课表
        manager
            .create_table(
                Table::create()
                    .table(Timetable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Timetable::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Timetable::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(Timetable::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(Timetable::StartTime).time().not_null())
                    .col(ColumnDef::new(Timetable::EndTime).time().not_null())
                    .col(ColumnDef::new(Timetable::CourseId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Timetable::Table, Timetable::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Timetable::Table, Timetable::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 缴费表
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::Amount).double().not_null())
                    .col(ColumnDef::new(Payments::Date).date().not_null())
                    .col(ColumnDef::new(Payments::Method).string_len(30).null())
                    .col(
                        ColumnDef::new(Payments::Status)
                            .string_len(10)
                            .not_null()
                            .default("paid"),
                    )
                    .col(ColumnDef::new(Payments::ReceiptPath).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 报表表
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::Type).string().not_null())
                    .col(ColumnDef::new(Reports::PeriodStart).date().null())
                    .col(ColumnDef::new(Reports::PeriodEnd).date().null())
                    .col(ColumnDef::new(Reports::FilePath).string().null())
                    .col(ColumnDef::new(Reports::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 文书表
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Type).string().not_null())
                    .col(ColumnDef::new(Documents::StudentId).big_integer().null())
                    .col(ColumnDef::new(Documents::FilePath).string().null())
                    .col(
                        ColumnDef::new(Documents::Signed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Documents::Meta).json().null())
                    .col(
                        ColumnDef::new(Documents::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Documents::Table, Documents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 日程事件表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Type).string().null())
                    .col(ColumnDef::new(Events::Start).big_integer().not_null())
                    .col(ColumnDef::new(Events::End).big_integer().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(ColumnDef::new(Subjects::Category).string().null())
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(
                        ColumnDef::new(Subjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Subjects::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 学科成绩表
        manager
            .create_table(
                Table::create()
                    .table(StudentGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentGrades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentGrades::Subject).string().not_null())
                    .col(ColumnDef::new(StudentGrades::ExamName).string().not_null())
                    .col(ColumnDef::new(StudentGrades::Grade).double().not_null())
                    .col(ColumnDef::new(StudentGrades::Coefficient).double().null())
                    .col(ColumnDef::new(StudentGrades::Semester).string().not_null())
                    .col(
                        ColumnDef::new(StudentGrades::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentGrades::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGrades::Table, StudentGrades::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentGrades::Table, StudentGrades::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 评价表
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::Rating).integer().not_null())
                    .col(
                        ColumnDef::new(Feedback::SatisfactionScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Feedback::TeachingQuality)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Feedback::CourseContent).integer().not_null())
                    .col(ColumnDef::new(Feedback::Communication).integer().not_null())
                    .col(ColumnDef::new(Feedback::Helpfulness).integer().not_null())
                    .col(ColumnDef::new(Feedback::Comment).text().null())
                    .col(ColumnDef::new(Feedback::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Feedback::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Feedback::Table, Feedback::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 机构设置表
        manager
            .create_table(
                Table::create()
                    .table(InstitutionSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstitutionSettings::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InstitutionSettings::Name).string().not_null())
                    .col(ColumnDef::new(InstitutionSettings::Address).string().not_null())
                    .col(ColumnDef::new(InstitutionSettings::Phone).string().not_null())
                    .col(ColumnDef::new(InstitutionSettings::Email).string().not_null())
                    .col(
                        ColumnDef::new(InstitutionSettings::TimeZone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::Language)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::DarkMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::FontSize)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::AutoPrint)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::LogoDataUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::Location)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InstitutionSettings::LogoPath).string().null())
                    .col(
                        ColumnDef::new(InstitutionSettings::AcademicYear)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::CurrentSemester)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(InstitutionSettings::GradingScale).json().null())
                    .col(
                        ColumnDef::new(InstitutionSettings::AttendanceTypes)
                            .json()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::PaymentMethods)
                            .json()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstitutionSettings::DocumentTypes)
                            .json()
                            .null(),
                    )
                    .col(ColumnDef::new(InstitutionSettings::EventTypes).json().null())
                    .col(
                        ColumnDef::new(InstitutionSettings::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 教师统计表
        manager
            .create_table(
                Table::create()
                    .table(TeacherStatistics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherStatistics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::TeacherId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::TotalStudents)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::TotalSubjects)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::YearsExperience)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::SatisfactionScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::AverageRating)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::TotalFeedbackCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::TeachingQuality)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::CourseContentRating)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::CommunicationRating)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::HelpfulnessRating)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::AttendanceRate)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::GradeImprovement)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherStatistics::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherStatistics::Table, TeacherStatistics::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_group_id")
                    .table(Students::Table)
                    .col(Students::GroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_teacher_id")
                    .table(Courses::Table)
                    .col(Courses::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_results_exam_student")
                    .table(ExamResults::Table)
                    .col(ExamResults::ExamId)
                    .col(ExamResults::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_timetable_group_day")
                    .table(Timetable::Table)
                    .col(Timetable::GroupId)
                    .col(Timetable::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_grades_natural_key")
                    .table(StudentGrades::Table)
                    .col(StudentGrades::StudentId)
                    .col(StudentGrades::Subject)
                    .col(StudentGrades::ExamName)
                    .col(StudentGrades::Semester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_grades_group_semester")
                    .table(StudentGrades::Table)
                    .col(StudentGrades::GroupId)
                    .col(StudentGrades::Semester)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_student_teacher_course")
                    .table(Feedback::Table)
                    .col(Feedback::StudentId)
                    .col(Feedback::TeacherId)
                    .col(Feedback::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TeacherStatistics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InstitutionSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Timetable::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Groups {
    #[sea_orm(iden = "groups")]
    Table,
    Id,
    Name,
    Level,
    Year,
    Capacity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    FullName,
    Speciality,
    Email,
    Phone,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FullName,
    GroupId,
    Email,
    Phone,
    Address,
    DateOfBirth,
    Gender,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    Description,
    Category,
    TeacherId,
    GroupId,
    MaxStudents,
    Fee,
    Duration,
    Schedule,
    StartDate,
    EndDate,
    Status,
    Level,
    Prerequisites,
    Objectives,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    CourseId,
    GroupId,
    ExamDate,
    MaxScore,
}

#[derive(DeriveIden)]
enum ExamResults {
    #[sea_orm(iden = "exam_results")]
    Table,
    Id,
    ExamId,
    StudentId,
    Score,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    Date,
    Status,
}

#[derive(DeriveIden)]
enum Timetable {
    #[sea_orm(iden = "timetable")]
    Table,
    Id,
    GroupId,
    DayOfWeek,
    StartTime,
    EndTime,
    CourseId,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    Amount,
    Date,
    Method,
    Status,
    ReceiptPath,
}

#[derive(DeriveIden)]
enum Reports {
    #[sea_orm(iden = "reports")]
    Table,
    Id,
    Type,
    PeriodStart,
    PeriodEnd,
    FilePath,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Documents {
    #[sea_orm(iden = "documents")]
    Table,
    Id,
    Type,
    StudentId,
    FilePath,
    Signed,
    Meta,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    Title,
    Description,
    Type,
    Start,
    End,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Category,
    Description,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentGrades {
    #[sea_orm(iden = "student_grades")]
    Table,
    Id,
    StudentId,
    GroupId,
    Subject,
    ExamName,
    Grade,
    Coefficient,
    Semester,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    #[sea_orm(iden = "feedback")]
    Table,
    Id,
    CourseId,
    TeacherId,
    StudentId,
    Rating,
    SatisfactionScore,
    TeachingQuality,
    CourseContent,
    Communication,
    Helpfulness,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InstitutionSettings {
    #[sea_orm(iden = "institution_settings")]
    Table,
    Id,
    Name,
    Address,
    Phone,
    Email,
    TimeZone,
    Language,
    DarkMode,
    FontSize,
    AutoPrint,
    LogoDataUrl,
    Location,
    LogoPath,
    AcademicYear,
    CurrentSemester,
    GradingScale,
    AttendanceTypes,
    PaymentMethods,
    DocumentTypes,
    EventTypes,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeacherStatistics {
    #[sea_orm(iden = "teacher_statistics")]
    Table,
    Id,
    TeacherId,
    TotalStudents,
    TotalSubjects,
    YearsExperience,
    SatisfactionScore,
    AverageRating,
    TotalFeedbackCount,
    TeachingQuality,
    CourseContentRating,
    CommunicationRating,
    HelpfulnessRating,
    AttendanceRate,
    GradeImprovement,
    CreatedAt,
    UpdatedAt,
}
