//! 考试、科目与科目成绩

use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::{exam_results, exams, student_grades, subjects};
use crate::errors::{EduManageError, Result};
use crate::models::{
    exams::{
        entities::{Exam, ExamListResponse, ExamResult},
        requests::{CreateExamRequest, ExamListQuery, ExamResultInput, UpdateExamRequest},
    },
    subject_grades::{
        entities::StudentGrade,
        requests::{GradeInput, GroupSubjectQuery, StudentGradesQuery},
    },
    subjects::{
        entities::{Subject, SubjectListResponse},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    // ==================== 考试 ====================

    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let model = exams::ActiveModel {
            course_id: Set(req.course_id),
            group_id: Set(req.group_id),
            exam_date: Set(req.exam_date),
            max_score: Set(req.max_score),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = exams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn list_exams_with_pagination_impl(
        &self,
        query: ExamListQuery,
    ) -> Result<ExamListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = exams::Entity::find();
        if let Some(course_id) = query.course_id {
            select = select.filter(exams::Column::CourseId.eq(course_id));
        }
        if let Some(group_id) = query.group_id {
            select = select.filter(exams::Column::GroupId.eq(group_id));
        }
        select = select.order_by_desc(exams::Column::Id);

        self.paginate(select, page, size, "考试", |m| m.into_exam())
            .await
    }

    pub async fn update_exam_impl(&self, id: i64, update: UpdateExamRequest) -> Result<Option<Exam>> {
        if self.get_exam_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = exams::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(group_id) = update.group_id {
            model.group_id = Set(group_id);
        }
        if let Some(exam_date) = update.exam_date {
            model.exam_date = Set(exam_date);
        }
        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新考试失败: {e}")))?;

        Ok(Some(result.into_exam()))
    }

    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = exams::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量写入考试成绩，(exam_id, student_id) 已存在则覆盖分数
    pub async fn upsert_exam_results_impl(
        &self,
        exam_id: i64,
        results: Vec<ExamResultInput>,
    ) -> Result<Vec<ExamResult>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduManageError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(results.len());
        for input in results {
            let existing = exam_results::Entity::find()
                .filter(exam_results::Column::ExamId.eq(exam_id))
                .filter(exam_results::Column::StudentId.eq(input.student_id))
                .one(&txn)
                .await
                .map_err(|e| EduManageError::database_operation(format!("查询考试成绩失败: {e}")))?;

            let model = match existing {
                Some(row) => exam_results::ActiveModel {
                    id: Set(row.id),
                    score: Set(input.score),
                    ..Default::default()
                }
                .update(&txn)
                .await,
                None => exam_results::ActiveModel {
                    exam_id: Set(exam_id),
                    student_id: Set(input.student_id),
                    score: Set(input.score),
                    ..Default::default()
                }
                .insert(&txn)
                .await,
            }
            .map_err(|e| EduManageError::database_operation(format!("保存考试成绩失败: {e}")))?;

            saved.push(model.into_exam_result());
        }

        txn.commit()
            .await
            .map_err(|e| EduManageError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn list_exam_results_impl(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        let rows = exam_results::Entity::find()
            .filter(exam_results::Column::ExamId.eq(exam_id))
            .order_by_asc(exam_results::Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_exam_result()).collect())
    }

    /// 全部考试成绩的 (平均分, 条数)
    pub async fn exam_score_summary_impl(&self) -> Result<(f64, u64)> {
        let scores: Vec<f64> = exam_results::Entity::find()
            .select_only()
            .column(exam_results::Column::Score)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计考试成绩失败: {e}")))?;

        if scores.is_empty() {
            return Ok((0.0, 0));
        }
        let count = scores.len() as u64;
        Ok((scores.iter().sum::<f64>() / count as f64, count))
    }

    // ==================== 科目 ====================

    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = subjects::ActiveModel {
            name: Set(req.name),
            category: Set(req.category),
            description: Set(req.description),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_name_impl(&self, name: &str) -> Result<Option<Subject>> {
        let result = subjects::Entity::find()
            .filter(subjects::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = subjects::Entity::find();
        if let Some(is_active) = query.is_active {
            select = select.filter(subjects::Column::IsActive.eq(is_active));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select =
                select.filter(subjects::Column::Name.contains(escape_like_pattern(search.trim())));
        }
        select = select.order_by_desc(subjects::Column::Id);

        self.paginate(select, page, size, "科目", |m| m.into_subject())
            .await
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subjects::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新科目失败: {e}")))?;

        Ok(Some(result.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = subjects::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ==================== 科目成绩 ====================

    /// 按 (student_id, subject, exam_name, semester) 写入或覆盖
    pub async fn upsert_student_grades_impl(
        &self,
        grades: Vec<GradeInput>,
    ) -> Result<Vec<StudentGrade>> {
        let now = now_ts();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduManageError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(grades.len());
        for input in grades {
            let existing = student_grades::Entity::find()
                .filter(student_grades::Column::StudentId.eq(input.student_id))
                .filter(student_grades::Column::Subject.eq(input.subject.as_str()))
                .filter(student_grades::Column::ExamName.eq(input.exam_name.as_str()))
                .filter(student_grades::Column::Semester.eq(input.semester.as_str()))
                .one(&txn)
                .await
                .map_err(|e| EduManageError::database_operation(format!("查询科目成绩失败: {e}")))?;

            let model = match existing {
                Some(row) => student_grades::ActiveModel {
                    id: Set(row.id),
                    group_id: Set(input.group_id),
                    grade: Set(input.grade),
                    coefficient: Set(input.coefficient),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&txn)
                .await,
                None => student_grades::ActiveModel {
                    student_id: Set(input.student_id),
                    group_id: Set(input.group_id),
                    subject: Set(input.subject),
                    exam_name: Set(input.exam_name),
                    grade: Set(input.grade),
                    coefficient: Set(input.coefficient),
                    semester: Set(input.semester),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await,
            }
            .map_err(|e| EduManageError::database_operation(format!("保存科目成绩失败: {e}")))?;

            saved.push(model.into_grade());
        }

        txn.commit()
            .await
            .map_err(|e| EduManageError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    pub async fn list_grades_by_group_subject_impl(
        &self,
        query: GroupSubjectQuery,
    ) -> Result<Vec<StudentGrade>> {
        let rows = student_grades::Entity::find()
            .filter(student_grades::Column::GroupId.eq(query.group_id))
            .filter(student_grades::Column::Subject.eq(query.subject))
            .filter(student_grades::Column::Semester.eq(query.semester))
            .order_by_asc(student_grades::Column::StudentId)
            .order_by_asc(student_grades::Column::ExamName)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询科目成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }

    pub async fn list_grades_by_student_impl(
        &self,
        query: StudentGradesQuery,
    ) -> Result<Vec<StudentGrade>> {
        let mut select =
            student_grades::Entity::find().filter(student_grades::Column::StudentId.eq(query.student_id));
        if let Some(semester) = query.semester {
            select = select.filter(student_grades::Column::Semester.eq(semester));
        }
        if let Some(group_id) = query.group_id {
            select = select.filter(student_grades::Column::GroupId.eq(group_id));
        }

        let rows = select
            .order_by_asc(student_grades::Column::Semester)
            .order_by_asc(student_grades::Column::Subject)
            .order_by_asc(student_grades::Column::ExamName)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询学生成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 班级某学期的全部成绩，按 id 升序（平均分计算依赖录入顺序）
    pub async fn list_grades_by_group_semester_impl(
        &self,
        group_id: i64,
        semester: &str,
    ) -> Result<Vec<StudentGrade>> {
        let rows = student_grades::Entity::find()
            .filter(student_grades::Column::GroupId.eq(group_id))
            .filter(student_grades::Column::Semester.eq(semester))
            .order_by_asc(student_grades::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询班级成绩失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_grade()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::{
        groups::requests::CreateGroupRequest,
        students::requests::CreateStudentRequest,
        subject_grades::requests::{GradeInput, GroupSubjectQuery, StudentGradesQuery},
        subjects::requests::CreateSubjectRequest,
    };

    async fn seed(storage: &super::SeaOrmStorage) -> (i64, i64) {
        let g = storage
            .create_group_impl(CreateGroupRequest {
                name: "1BAC".into(),
                level: None,
                year: None,
                capacity: None,
            })
            .await
            .unwrap();
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Hamza Chraibi".into(),
                group_id: Some(g.id),
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();
        (g.id, s.id)
    }

    fn grade(student_id: i64, group_id: i64, exam: &str, value: f64) -> GradeInput {
        GradeInput {
            student_id,
            group_id,
            subject: "Maths".into(),
            exam_name: exam.into(),
            grade: value,
            coefficient: Some(4.0),
            semester: "S1".into(),
        }
    }

    #[tokio::test]
    async fn test_grade_upsert_on_natural_key() {
        let storage = memory_storage().await;
        let (group_id, student_id) = seed(&storage).await;

        storage
            .upsert_student_grades_impl(vec![
                grade(student_id, group_id, "Contrôle 1", 12.0),
                grade(student_id, group_id, "Contrôle 2", 15.0),
            ])
            .await
            .unwrap();
        storage
            .upsert_student_grades_impl(vec![grade(student_id, group_id, "Contrôle 1", 14.5)])
            .await
            .unwrap();

        let rows = storage
            .list_grades_by_group_subject_impl(GroupSubjectQuery {
                group_id,
                subject: "Maths".into(),
                semester: "S1".into(),
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].exam_name, "Contrôle 1");
        assert_eq!(rows[0].grade, 14.5);

        let by_student = storage
            .list_grades_by_student_impl(StudentGradesQuery {
                student_id,
                semester: Some("S2".into()),
                group_id: None,
            })
            .await
            .unwrap();
        assert!(by_student.is_empty());
    }

    #[tokio::test]
    async fn test_subject_lookup_by_name() {
        let storage = memory_storage().await;
        let created = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Philosophie".into(),
                category: None,
                description: None,
                is_active: None,
            })
            .await
            .unwrap();
        assert!(created.is_active);

        let found = storage
            .get_subject_by_name_impl("Philosophie")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
        assert!(storage.get_subject_by_name_impl("Arabe").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exam_score_summary_empty() {
        let storage = memory_storage().await;
        assert_eq!(storage.exam_score_summary_impl().await.unwrap(), (0.0, 0));
    }
}
