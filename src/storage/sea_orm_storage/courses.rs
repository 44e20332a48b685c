use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{EduManageError, Result};
use crate::models::courses::{
    entities::{COURSE_STATUS_ACTIVE, Course, CourseListResponse},
    requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    responses::CourseRef,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = now_ts();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            category: Set(req.category),
            teacher_id: Set(req.teacher_id),
            group_id: Set(req.group_id),
            max_students: Set(req.max_students),
            fee: Set(req.fee),
            duration: Set(req.duration),
            schedule: Set(req.schedule),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            status: Set(req
                .status
                .unwrap_or_else(|| COURSE_STATUS_ACTIVE.to_string())),
            level: Set(req.level),
            prerequisites: Set(req.prerequisites),
            objectives: Set(req.objectives),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Courses::find();
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(group_id) = query.group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "课程", |m| m.into_course())
            .await
    }

    pub async fn list_courses_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Course>> {
        let rows = Courses::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_course()).collect())
    }

    /// 全部课程的 (id, name)，用于校验提示
    pub async fn list_course_refs_impl(&self) -> Result<Vec<CourseRef>> {
        let rows: Vec<(i64, String)> = Courses::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Name)
            .order_by_asc(Column::Id)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| CourseRef { id, name })
            .collect())
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }
        if let Some(group_id) = update.group_id {
            model.group_id = Set(Some(group_id));
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(Some(max_students));
        }
        if let Some(fee) = update.fee {
            model.fee = Set(Some(fee));
        }
        if let Some(duration) = update.duration {
            model.duration = Set(Some(duration));
        }
        if let Some(schedule) = update.schedule {
            model.schedule = Set(Some(schedule));
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(Some(start_date));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date));
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(level) = update.level {
            model.level = Set(Some(level));
        }
        if let Some(prerequisites) = update.prerequisites {
            model.prerequisites = Set(Some(prerequisites));
        }
        if let Some(objectives) = update.objectives {
            model.objectives = Set(Some(objectives));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新课程失败: {e}")))?;

        Ok(Some(result.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计课程数量失败: {e}")))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::courses::requests::{CreateCourseRequest, UpdateCourseRequest};

    pub(crate) fn course(name: &str, teacher_id: Option<i64>, group_id: Option<i64>) -> CreateCourseRequest {
        CreateCourseRequest {
            name: name.to_string(),
            description: None,
            category: Some("Sciences".into()),
            teacher_id,
            group_id,
            max_students: Some(25),
            fee: Some(450.0),
            duration: None,
            schedule: None,
            start_date: None,
            end_date: None,
            status: None,
            level: None,
            prerequisites: None,
            objectives: None,
        }
    }

    #[tokio::test]
    async fn test_course_defaults_and_refs() {
        let storage = memory_storage().await;
        let maths = storage
            .create_course_impl(course("Mathématiques", None, None))
            .await
            .unwrap();
        assert_eq!(maths.status, "active");
        storage
            .create_course_impl(course("Physique", None, None))
            .await
            .unwrap();

        let refs = storage.list_course_refs_impl().await.unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].id, maths.id);
        assert_eq!(refs[0].name, "Mathématiques");
        assert_eq!(storage.count_courses_impl().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_course_keeps_untouched_fields() {
        let storage = memory_storage().await;
        let c = storage
            .create_course_impl(course("SVT", None, None))
            .await
            .unwrap();

        let updated = storage
            .update_course_impl(
                c.id,
                UpdateCourseRequest {
                    fee: Some(500.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fee, Some(500.0));
        assert_eq!(updated.name, "SVT");
        assert_eq!(updated.max_students, Some(25));
    }
}
