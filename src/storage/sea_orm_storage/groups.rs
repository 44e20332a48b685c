use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::groups::{ActiveModel, Column, Entity as Groups};
use crate::entity::{courses, students};
use crate::errors::{EduManageError, Result};
use crate::models::groups::{
    entities::{Group, GroupListResponse},
    requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_group_impl(&self, req: CreateGroupRequest) -> Result<Group> {
        let model = ActiveModel {
            name: Set(req.name),
            level: Set(req.level),
            year: Set(req.year),
            capacity: Set(req.capacity),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_group())
    }

    pub async fn get_group_by_id_impl(&self, id: i64) -> Result<Option<Group>> {
        let result = Groups::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 分页列出班级
    pub async fn list_groups_with_pagination_impl(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Groups::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "班级", |m| m.into_group())
            .await
    }

    /// 更新班级
    pub async fn update_group_impl(
        &self,
        id: i64,
        update: UpdateGroupRequest,
    ) -> Result<Option<Group>> {
        if self.get_group_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(level) = update.level {
            model.level = Set(Some(level));
        }
        if let Some(year) = update.year {
            model.year = Set(Some(year));
        }
        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_group()))
    }

    /// 删除班级，学生与课程的班级引用置空
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduManageError::database_operation(format!("开启事务失败: {e}")))?;

        students::Entity::update_many()
            .col_expr(students::Column::GroupId, Expr::value(Option::<i64>::None))
            .filter(students::Column::GroupId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduManageError::database_operation(format!("解除学生班级失败: {e}")))?;

        courses::Entity::update_many()
            .col_expr(courses::Column::GroupId, Expr::value(Option::<i64>::None))
            .filter(courses::Column::GroupId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| EduManageError::database_operation(format!("解除课程班级失败: {e}")))?;

        let result = Groups::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduManageError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::groups::requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest};
    use crate::models::students::requests::CreateStudentRequest;

    fn group(name: &str) -> CreateGroupRequest {
        CreateGroupRequest {
            name: name.to_string(),
            level: Some("Bac".to_string()),
            year: Some(2024),
            capacity: Some(30),
        }
    }

    #[tokio::test]
    async fn test_group_crud_and_search() {
        let storage = memory_storage().await;
        let g1 = storage.create_group_impl(group("2BAC SM")).await.unwrap();
        storage.create_group_impl(group("1BAC SE")).await.unwrap();

        let list = storage
            .list_groups_with_pagination_impl(GroupListQuery {
                page: Some(1),
                size: Some(10),
                search: Some("SM".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, g1.id);

        let updated = storage
            .update_group_impl(
                g1.id,
                UpdateGroupRequest {
                    name: None,
                    level: None,
                    year: None,
                    capacity: Some(25),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.capacity, Some(25));
        assert_eq!(updated.name, "2BAC SM");

        let missing = storage
            .update_group_impl(
                999,
                UpdateGroupRequest {
                    name: Some("x".into()),
                    level: None,
                    year: None,
                    capacity: None,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_group_detaches_students() {
        let storage = memory_storage().await;
        let g = storage.create_group_impl(group("TC")).await.unwrap();
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Salma Idrissi".into(),
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

        assert!(storage.delete_group_impl(g.id).await.unwrap());
        let reloaded = storage.get_student_by_id_impl(s.id).await.unwrap().unwrap();
        assert_eq!(reloaded.group_id, None);
        assert!(!storage.delete_group_impl(g.id).await.unwrap());
    }
}
