use super::{SeaOrmStorage, now_ts};
use crate::entity::admins::{ActiveModel, Column, Entity as Admins};
use crate::errors::{EduManageError, Result};
use crate::models::admins::entities::Admin;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建管理员
    pub async fn create_admin_impl(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let model = ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建管理员失败: {e}")))?;

        Ok(result.into_admin())
    }

    pub async fn get_admin_by_id_impl(&self, id: i64) -> Result<Option<Admin>> {
        let result = Admins::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    pub async fn get_admin_by_username_impl(&self, username: &str) -> Result<Option<Admin>> {
        let result = Admins::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    pub async fn count_admins_impl(&self) -> Result<u64> {
        Admins::find()
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计管理员数量失败: {e}")))
    }

    /// 更新密码哈希
    pub async fn update_admin_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = Admins::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新管理员密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;

    #[tokio::test]
    async fn test_admin_lifecycle() {
        let storage = memory_storage().await;
        assert_eq!(storage.count_admins_impl().await.unwrap(), 0);

        let admin = storage.create_admin_impl("direction", "hash-1").await.unwrap();
        assert_eq!(admin.username, "direction");

        let found = storage
            .get_admin_by_username_impl("direction")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, admin.id);

        assert!(
            storage
                .update_admin_password_impl(admin.id, "hash-2")
                .await
                .unwrap()
        );
        let reloaded = storage.get_admin_by_id_impl(admin.id).await.unwrap().unwrap();
        assert_eq!(reloaded.password_hash, "hash-2");
        assert!(!storage.update_admin_password_impl(999, "x").await.unwrap());
    }
}
