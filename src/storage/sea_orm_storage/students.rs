use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{EduManageError, Result};
use crate::models::students::{
    entities::{STUDENT_STATUS_ACTIVE, Student, StudentListResponse},
    requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            full_name: Set(req.full_name),
            group_id: Set(req.group_id),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            date_of_birth: Set(req.birth_date),
            gender: Set(req.gender),
            status: Set(req
                .status
                .unwrap_or_else(|| STUDENT_STATUS_ACTIVE.to_string())),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Students::find();

        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::FullName.contains(escape_like_pattern(search.trim())));
        }

        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "学生", |m| m.into_student())
            .await
    }

    /// 班级学生（按姓名排序）
    pub async fn list_students_by_group_impl(&self, group_id: i64) -> Result<Vec<Student>> {
        let rows = Students::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_asc(Column::FullName)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(group_id) = update.group_id {
            model.group_id = Set(Some(group_id));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(birth_date) = update.birth_date {
            model.date_of_birth = Set(Some(birth_date));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender));
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计学生数量失败: {e}")))
    }

    /// 统计若干班级内的学生总数
    pub async fn count_students_in_groups_impl(&self, group_ids: &[i64]) -> Result<u64> {
        if group_ids.is_empty() {
            return Ok(0);
        }

        Students::find()
            .filter(Column::GroupId.is_in(group_ids.iter().copied()))
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计班级学生失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::groups::requests::CreateGroupRequest;
    use crate::models::students::requests::{
        CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
    };

    fn student(name: &str, group_id: Option<i64>) -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: name.to_string(),
            group_id,
            email: None,
            phone: None,
            address: None,
            birth_date: None,
            gender: Some("F".into()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_student_defaults_and_filters() {
        let storage = memory_storage().await;
        let g = storage
            .create_group_impl(CreateGroupRequest {
                name: "3AC".into(),
                level: None,
                year: None,
                capacity: None,
            })
            .await
            .unwrap();

        let yasmine = storage
            .create_student_impl(student("Yasmine Alaoui", Some(g.id)))
            .await
            .unwrap();
        assert_eq!(yasmine.status, "active");
        storage
            .create_student_impl(student("Karim Bennani", None))
            .await
            .unwrap();

        let in_group = storage.list_students_by_group_impl(g.id).await.unwrap();
        assert_eq!(in_group.len(), 1);

        let searched = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: None,
                size: None,
                group_id: None,
                status: None,
                search: Some("karim".into()),
            })
            .await
            .unwrap();
        assert_eq!(searched.pagination.total, 1);

        assert_eq!(storage.count_students_impl().await.unwrap(), 2);
        assert_eq!(
            storage.count_students_in_groups_impl(&[g.id]).await.unwrap(),
            1
        );
        assert_eq!(storage.count_students_in_groups_impl(&[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_student() {
        let storage = memory_storage().await;
        let s = storage
            .create_student_impl(student("Omar Tazi", None))
            .await
            .unwrap();

        let updated = storage
            .update_student_impl(
                s.id,
                UpdateStudentRequest {
                    full_name: None,
                    group_id: None,
                    email: Some("omar@example.ma".into()),
                    phone: None,
                    address: None,
                    birth_date: None,
                    gender: None,
                    status: Some("inactive".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.email.as_deref(), Some("omar@example.ma"));
        assert_eq!(updated.status, "inactive");

        assert!(storage.delete_student_impl(s.id).await.unwrap());
        assert!(storage.get_student_by_id_impl(s.id).await.unwrap().is_none());
    }
}
