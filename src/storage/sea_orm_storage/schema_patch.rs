//! 旧库结构补丁
//!
//! 早期部署的表可能缺少后来新增的列。迁移完成后逐列检查，缺失则补齐；
//! 每一列独立执行，失败只记录日志。

use migration::{Alias, ColumnDef, SchemaManager, Table};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// 需要补齐的列：(表, 列, 列定义)
pub(crate) fn legacy_columns() -> Vec<(&'static str, &'static str, ColumnDef)> {
    vec![
        (
            "students",
            "status",
            ColumnDef::new(Alias::new("status"))
                .string()
                .not_null()
                .default("active")
                .to_owned(),
        ),
        (
            "payments",
            "receipt_path",
            ColumnDef::new(Alias::new("receipt_path"))
                .string()
                .null()
                .to_owned(),
        ),
        (
            "feedback",
            "student_id",
            ColumnDef::new(Alias::new("student_id"))
                .big_integer()
                .null()
                .to_owned(),
        ),
        (
            "feedback",
            "comment",
            ColumnDef::new(Alias::new("comment")).text().null().to_owned(),
        ),
        (
            "feedback",
            "updated_at",
            ColumnDef::new(Alias::new("updated_at"))
                .big_integer()
                .not_null()
                .default(0)
                .to_owned(),
        ),
        (
            "student_grades",
            "updated_at",
            ColumnDef::new(Alias::new("updated_at"))
                .big_integer()
                .not_null()
                .default(0)
                .to_owned(),
        ),
        (
            "subscriptions",
            "stripe_subscription_id",
            ColumnDef::new(Alias::new("stripe_subscription_id"))
                .string()
                .null()
                .to_owned(),
        ),
        (
            "subscription_invoices",
            "stripe_invoice_id",
            ColumnDef::new(Alias::new("stripe_invoice_id"))
                .string()
                .null()
                .to_owned(),
        ),
    ]
}

pub(crate) async fn apply_legacy_column_patches(db: &DatabaseConnection) {
    let manager = SchemaManager::new(db);

    for (table, column, mut def) in legacy_columns() {
        match manager.has_column(table, column).await {
            Ok(true) => {}
            Ok(false) => {
                let stmt = Table::alter()
                    .table(Alias::new(table))
                    .add_column(&mut def)
                    .to_owned();
                match manager.alter_table(stmt).await {
                    Ok(()) => info!("Added missing column {}.{}", table, column),
                    Err(e) => warn!("Failed to add column {}.{}: {}", table, column, e),
                }
            }
            Err(e) => warn!("Failed to inspect column {}.{}: {}", table, column, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectionTrait, Database};

    #[test]
    fn test_patch_list_covers_every_legacy_column() {
        let columns: Vec<String> = legacy_columns()
            .iter()
            .map(|(t, c, _)| format!("{t}.{c}"))
            .collect();
        assert_eq!(columns.len(), 8);
        assert!(columns.contains(&"payments.receipt_path".to_string()));
        assert!(columns.contains(&"subscription_invoices.stripe_invoice_id".to_string()));
    }

    #[tokio::test]
    async fn test_patch_adds_missing_column_once() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.execute_unprepared(
            "CREATE TABLE payments (id INTEGER PRIMARY KEY, student_id INTEGER NOT NULL, amount REAL NOT NULL)",
        )
        .await
        .unwrap();

        apply_legacy_column_patches(&db).await;
        apply_legacy_column_patches(&db).await;

        let manager = SchemaManager::new(&db);
        assert!(manager.has_column("payments", "receipt_path").await.unwrap());
        // 不存在的表只记录告警
        assert!(!manager.has_column("students", "status").await.unwrap());
    }
}
