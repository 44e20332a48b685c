use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::teacher_statistics;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{EduManageError, Result};
use crate::models::teachers::{
    entities::{Teacher, TeacherListResponse, TeacherStatistics},
    requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let model = ActiveModel {
            full_name: Set(req.full_name),
            speciality: Set(req.speciality),
            email: Set(req.email),
            phone: Set(req.phone),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Teachers::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::FullName.contains(escape_like_pattern(search.trim())));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "教师", |m| m.into_teacher())
            .await
    }

    pub async fn list_teacher_ids_impl(&self) -> Result<Vec<i64>> {
        Teachers::find()
            .select_only()
            .column(Column::Id)
            .order_by_asc(Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师 ID 失败: {e}")))
    }

    /// 更新教师
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(speciality) = update.speciality {
            model.speciality = Set(Some(speciality));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新教师失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_teachers_impl(&self) -> Result<u64> {
        Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计教师数量失败: {e}")))
    }

    pub async fn count_teachers_created_since_impl(&self, timestamp: i64) -> Result<u64> {
        Teachers::find()
            .filter(Column::CreatedAt.gte(timestamp))
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计新教师数量失败: {e}")))
    }

    // ==================== 教师统计 ====================

    pub async fn get_teacher_statistics_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Option<TeacherStatistics>> {
        let result = teacher_statistics::Entity::find()
            .filter(teacher_statistics::Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师统计失败: {e}")))?;

        Ok(result.map(|m| m.into_statistics()))
    }

    /// 每位教师一行：存在则覆盖，否则插入
    pub async fn upsert_teacher_statistics_impl(
        &self,
        stats: TeacherStatistics,
    ) -> Result<TeacherStatistics> {
        let now = now_ts();
        let existing = teacher_statistics::Entity::find()
            .filter(teacher_statistics::Column::TeacherId.eq(stats.teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师统计失败: {e}")))?;

        let mut model = teacher_statistics::ActiveModel {
            teacher_id: Set(stats.teacher_id),
            total_students: Set(stats.total_students),
            total_subjects: Set(stats.total_subjects),
            years_experience: Set(stats.years_experience),
            satisfaction_score: Set(stats.satisfaction_score),
            average_rating: Set(stats.average_rating),
            total_feedback_count: Set(stats.total_feedback_count),
            teaching_quality: Set(stats.teaching_quality),
            course_content_rating: Set(stats.course_content_rating),
            communication_rating: Set(stats.communication_rating),
            helpfulness_rating: Set(stats.helpfulness_rating),
            attendance_rate: Set(stats.attendance_rate),
            grade_improvement: Set(stats.grade_improvement),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = match existing {
            Some(row) => {
                model.id = Set(row.id);
                model.update(&self.db).await
            }
            None => {
                model.created_at = Set(now);
                model.insert(&self.db).await
            }
        }
        .map_err(|e| EduManageError::database_operation(format!("保存教师统计失败: {e}")))?;

        Ok(result.into_statistics())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::teachers::{entities::TeacherStatistics, requests::CreateTeacherRequest};

    fn stats(teacher_id: i64, feedback: i32) -> TeacherStatistics {
        TeacherStatistics {
            teacher_id,
            total_students: 12,
            total_subjects: 2,
            years_experience: 0,
            satisfaction_score: 80.0,
            average_rating: 4.0,
            total_feedback_count: feedback,
            teaching_quality: 4.0,
            course_content_rating: 4.0,
            communication_rating: 4.0,
            helpfulness_rating: 4.0,
            attendance_rate: 85.0,
            grade_improvement: 80.0,
        }
    }

    #[tokio::test]
    async fn test_statistics_upsert_keeps_one_row() {
        let storage = memory_storage().await;
        let t = storage
            .create_teacher_impl(CreateTeacherRequest {
                full_name: "Nadia Berrada".into(),
                speciality: Some("Physique".into()),
                email: None,
                phone: None,
            })
            .await
            .unwrap();

        assert!(storage.get_teacher_statistics_impl(t.id).await.unwrap().is_none());
        storage.upsert_teacher_statistics_impl(stats(t.id, 1)).await.unwrap();
        storage.upsert_teacher_statistics_impl(stats(t.id, 3)).await.unwrap();

        let stored = storage.get_teacher_statistics_impl(t.id).await.unwrap().unwrap();
        assert_eq!(stored.total_feedback_count, 3);

        assert_eq!(storage.list_teacher_ids_impl().await.unwrap(), vec![t.id]);
        assert_eq!(storage.count_teachers_created_since_impl(0).await.unwrap(), 1);
        assert_eq!(
            storage
                .count_teachers_created_since_impl(i64::MAX)
                .await
                .unwrap(),
            0
        );
    }
}
