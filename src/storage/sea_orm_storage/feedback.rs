use super::{SeaOrmStorage, now_ts};
use crate::entity::feedback::{ActiveModel, Column, Entity as Feedbacks};
use crate::errors::{EduManageError, Result};
use crate::models::feedback::{entities::Feedback, requests::CreateFeedbackRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 按 (student_id, teacher_id, course_id) 写入或覆盖
    pub async fn upsert_feedback_impl(&self, req: CreateFeedbackRequest) -> Result<Feedback> {
        let now = now_ts();
        let existing = Feedbacks::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::TeacherId.eq(req.teacher_id))
            .filter(Column::CourseId.eq(req.course_id))
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询评价失败: {e}")))?;

        let mut model = ActiveModel {
            rating: Set(req.rating),
            satisfaction_score: Set(req.satisfaction_score),
            teaching_quality: Set(req.teaching_quality),
            course_content: Set(req.course_content),
            communication: Set(req.communication),
            helpfulness: Set(req.helpfulness),
            comment: Set(req.comments),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = match existing {
            Some(row) => {
                model.id = Set(row.id);
                model.update(&self.db).await
            }
            None => {
                model.student_id = Set(req.student_id);
                model.teacher_id = Set(req.teacher_id);
                model.course_id = Set(req.course_id);
                model.created_at = Set(now);
                model.insert(&self.db).await
            }
        }
        .map_err(|e| EduManageError::database_operation(format!("保存评价失败: {e}")))?;

        Ok(result.into_feedback())
    }

    pub async fn get_feedback_by_id_impl(&self, id: i64) -> Result<Option<Feedback>> {
        let result = Feedbacks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_feedback()))
    }

    pub async fn list_feedback_impl(&self, skip: u64, limit: u64) -> Result<Vec<Feedback>> {
        let rows = Feedbacks::find()
            .order_by_desc(Column::Id)
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询评价列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_feedback()).collect())
    }

    pub async fn list_feedback_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Feedback>> {
        let rows = Feedbacks::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师评价失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_feedback()).collect())
    }

    pub async fn list_feedback_by_course_impl(&self, course_id: i64) -> Result<Vec<Feedback>> {
        let rows = Feedbacks::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询课程评价失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_feedback()).collect())
    }

    pub async fn delete_feedback_impl(&self, id: i64) -> Result<bool> {
        let result = Feedbacks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除评价失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::courses::tests::course;
    use super::super::test_support::memory_storage;
    use crate::models::feedback::requests::CreateFeedbackRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::teachers::requests::CreateTeacherRequest;

    #[tokio::test]
    async fn test_feedback_upsert_on_triplet() {
        let storage = memory_storage().await;
        let t = storage
            .create_teacher_impl(CreateTeacherRequest {
                full_name: "Youssef Kettani".into(),
                speciality: None,
                email: None,
                phone: None,
            })
            .await
            .unwrap();
        let c = storage
            .create_course_impl(course("Anglais", Some(t.id), None))
            .await
            .unwrap();
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Lina Sqalli".into(),
                group_id: None,
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();

        let mut req = CreateFeedbackRequest {
            student_id: s.id,
            teacher_id: t.id,
            course_id: c.id,
            rating: 3,
            satisfaction_score: 6,
            teaching_quality: 3,
            course_content: 3,
            communication: 3,
            helpfulness: 3,
            comments: None,
        };
        let first = storage.upsert_feedback_impl(req.clone()).await.unwrap();
        req.rating = 5;
        req.comments = Some("Très clair".into());
        let second = storage.upsert_feedback_impl(req).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 5);
        assert_eq!(second.comments.as_deref(), Some("Très clair"));
        assert_eq!(storage.list_feedback_by_teacher_impl(t.id).await.unwrap().len(), 1);
        assert_eq!(storage.list_feedback_impl(1, 100).await.unwrap().len(), 0);
    }
}
