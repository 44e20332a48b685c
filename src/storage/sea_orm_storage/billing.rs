//! 订阅套餐、订阅、账单与用量记录

use super::{SeaOrmStorage, now_ts};
use crate::entity::{subscription_invoices, subscription_plans, subscriptions, usage_metrics};
use crate::errors::{EduManageError, Result};
use crate::models::subscriptions::{
    entities::{
        INVOICE_STATUS_PENDING, SUBSCRIPTION_STATUS_ACTIVE, SUBSCRIPTION_STATUS_PENDING,
        Subscription, SubscriptionInvoice, SubscriptionPlan, UsageMetric,
    },
    requests::{
        CreateInvoiceRequest, CreatePlanRequest, CreateSubscriptionRequest, UpdateInvoiceRequest,
        UpdatePlanRequest, UpdateSubscriptionRequest,
    },
};
use crate::utils::random_code::generate_invoice_number;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

fn features_json(features: Vec<String>) -> serde_json::Value {
    serde_json::Value::from(features)
}

impl SeaOrmStorage {
    // ==================== 套餐 ====================

    pub async fn create_plan_impl(&self, req: CreatePlanRequest) -> Result<SubscriptionPlan> {
        let now = now_ts();
        let model = subscription_plans::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            price: Set(req.price),
            billing_interval: Set(req.billing_interval.to_string()),
            features: Set(Some(features_json(req.features))),
            max_students: Set(req.max_students),
            max_teachers: Set(req.max_teachers),
            max_courses: Set(req.max_courses),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建订阅套餐失败: {e}")))?;

        Ok(result.into_plan())
    }

    pub async fn get_plan_by_id_impl(&self, id: i64) -> Result<Option<SubscriptionPlan>> {
        let result = subscription_plans::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅套餐失败: {e}")))?;

        Ok(result.map(|m| m.into_plan()))
    }

    pub async fn list_active_plans_impl(&self) -> Result<Vec<SubscriptionPlan>> {
        let rows = subscription_plans::Entity::find()
            .filter(subscription_plans::Column::IsActive.eq(true))
            .order_by_asc(subscription_plans::Column::Price)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅套餐失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_plan()).collect())
    }

    pub async fn update_plan_impl(
        &self,
        id: i64,
        update: UpdatePlanRequest,
    ) -> Result<Option<SubscriptionPlan>> {
        if self.get_plan_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subscription_plans::ActiveModel {
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
        if let Some(price) = update.price {
            model.price = Set(price);
        }
        if let Some(interval) = update.billing_interval {
            model.billing_interval = Set(interval.to_string());
        }
        if let Some(features) = update.features {
            model.features = Set(Some(features_json(features)));
        }
        if let Some(max_students) = update.max_students {
            model.max_students = Set(Some(max_students));
        }
        if let Some(max_teachers) = update.max_teachers {
            model.max_teachers = Set(Some(max_teachers));
        }
        if let Some(max_courses) = update.max_courses {
            model.max_courses = Set(Some(max_courses));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新订阅套餐失败: {e}")))?;

        Ok(Some(result.into_plan()))
    }

    /// 软删除
    pub async fn deactivate_plan_impl(&self, id: i64) -> Result<bool> {
        let result = subscription_plans::Entity::update_many()
            .col_expr(subscription_plans::Column::IsActive, Expr::value(false))
            .col_expr(subscription_plans::Column::UpdatedAt, Expr::value(now_ts()))
            .filter(subscription_plans::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("停用订阅套餐失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ==================== 订阅 ====================

    /// 订阅与首张待付账单同一事务写入
    pub async fn create_subscription_with_invoice_impl(
        &self,
        admin_id: i64,
        req: CreateSubscriptionRequest,
        invoice_amount: f64,
        invoice_number: &str,
    ) -> Result<(Subscription, SubscriptionInvoice)> {
        let now = now_ts();
        let today = Utc::now().date_naive();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduManageError::database_operation(format!("开启事务失败: {e}")))?;

        let stripe_invoice_id = req.stripe_invoice_id.filter(|id| !id.is_empty());
        let subscription = subscriptions::ActiveModel {
            admin_id: Set(admin_id),
            plan_id: Set(req.plan_id),
            status: Set(req
                .status
                .unwrap_or_else(|| SUBSCRIPTION_STATUS_PENDING.to_string())),
            start_date: Set(req.start_date.unwrap_or(today)),
            end_date: Set(req.end_date),
            auto_renew: Set(req.auto_renew.unwrap_or(true)),
            stripe_subscription_id: Set(req.stripe_subscription_id.filter(|id| !id.is_empty())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EduManageError::database_operation(format!("创建订阅失败: {e}")))?;

        let invoice = subscription_invoices::ActiveModel {
            subscription_id: Set(subscription.id),
            amount: Set(invoice_amount),
            status: Set(INVOICE_STATUS_PENDING.to_string()),
            billing_date: Set(today),
            paid_date: Set(None),
            payment_method: Set(None),
            invoice_number: Set(invoice_number.to_string()),
            stripe_invoice_id: Set(stripe_invoice_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| EduManageError::database_operation(format!("创建订阅账单失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduManageError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((subscription.into_subscription(), invoice.into_invoice()))
    }

    pub async fn get_subscription_by_id_impl(&self, id: i64) -> Result<Option<Subscription>> {
        let result = subscriptions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅失败: {e}")))?;

        Ok(result.map(|m| m.into_subscription()))
    }

    pub async fn list_subscriptions_by_admin_impl(&self, admin_id: i64) -> Result<Vec<Subscription>> {
        let rows = subscriptions::Entity::find()
            .filter(subscriptions::Column::AdminId.eq(admin_id))
            .order_by_desc(subscriptions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_subscription()).collect())
    }

    /// 最近一条 active 订阅
    pub async fn get_active_subscription_impl(&self, admin_id: i64) -> Result<Option<Subscription>> {
        let result = subscriptions::Entity::find()
            .filter(subscriptions::Column::AdminId.eq(admin_id))
            .filter(subscriptions::Column::Status.eq(SUBSCRIPTION_STATUS_ACTIVE))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .order_by_desc(subscriptions::Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询有效订阅失败: {e}")))?;

        Ok(result.map(|m| m.into_subscription()))
    }

    pub async fn update_subscription_impl(
        &self,
        id: i64,
        update: UpdateSubscriptionRequest,
    ) -> Result<Option<Subscription>> {
        if self.get_subscription_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subscriptions::ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(plan_id) = update.plan_id {
            model.plan_id = Set(plan_id);
        }
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(Some(end_date));
        }
        if let Some(auto_renew) = update.auto_renew {
            model.auto_renew = Set(auto_renew);
        }
        if let Some(stripe_id) = update.stripe_subscription_id {
            model.stripe_subscription_id = Set(Some(stripe_id).filter(|id| !id.is_empty()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新订阅失败: {e}")))?;

        Ok(Some(result.into_subscription()))
    }

    pub async fn set_subscription_status_by_stripe_id_impl(
        &self,
        stripe_subscription_id: &str,
        status: &str,
    ) -> Result<bool> {
        let result = subscriptions::Entity::update_many()
            .col_expr(subscriptions::Column::Status, Expr::value(status))
            .col_expr(subscriptions::Column::UpdatedAt, Expr::value(now_ts()))
            .filter(subscriptions::Column::StripeSubscriptionId.eq(stripe_subscription_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新订阅状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ==================== 账单 ====================

    pub async fn create_invoice_impl(&self, req: CreateInvoiceRequest) -> Result<SubscriptionInvoice> {
        let model = subscription_invoices::ActiveModel {
            subscription_id: Set(req.subscription_id),
            amount: Set(req.amount),
            status: Set(req
                .status
                .unwrap_or_else(|| INVOICE_STATUS_PENDING.to_string())),
            billing_date: Set(req.billing_date.unwrap_or_else(|| Utc::now().date_naive())),
            paid_date: Set(req.paid_date),
            payment_method: Set(req.payment_method),
            invoice_number: Set(req.invoice_number.unwrap_or_else(generate_invoice_number)),
            stripe_invoice_id: Set(req.stripe_invoice_id.filter(|id| !id.is_empty())),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建订阅账单失败: {e}")))?;

        Ok(result.into_invoice())
    }

    pub async fn get_invoice_by_id_impl(&self, id: i64) -> Result<Option<SubscriptionInvoice>> {
        let result = subscription_invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅账单失败: {e}")))?;

        Ok(result.map(|m| m.into_invoice()))
    }

    /// 通过订阅归属筛选管理员的账单
    pub async fn list_invoices_by_admin_impl(
        &self,
        admin_id: i64,
    ) -> Result<Vec<SubscriptionInvoice>> {
        let rows = subscription_invoices::Entity::find()
            .inner_join(subscriptions::Entity)
            .filter(subscriptions::Column::AdminId.eq(admin_id))
            .order_by_desc(subscription_invoices::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询订阅账单失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_invoice()).collect())
    }

    pub async fn update_invoice_impl(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<SubscriptionInvoice>> {
        if self.get_invoice_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = subscription_invoices::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(status) = update.status {
            model.status = Set(status);
        }
        if let Some(paid_date) = update.paid_date {
            model.paid_date = Set(Some(paid_date));
        }
        if let Some(payment_method) = update.payment_method {
            model.payment_method = Set(Some(payment_method));
        }
        if let Some(stripe_id) = update.stripe_invoice_id {
            model.stripe_invoice_id = Set(Some(stripe_id).filter(|id| !id.is_empty()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新订阅账单失败: {e}")))?;

        Ok(Some(result.into_invoice()))
    }

    pub async fn set_invoice_status_by_stripe_id_impl(
        &self,
        stripe_invoice_id: &str,
        status: &str,
        paid_date: Option<NaiveDate>,
    ) -> Result<bool> {
        let mut update = subscription_invoices::Entity::update_many()
            .col_expr(subscription_invoices::Column::Status, Expr::value(status));
        if let Some(paid_date) = paid_date {
            update = update.col_expr(subscription_invoices::Column::PaidDate, Expr::value(paid_date));
        }

        let result = update
            .filter(subscription_invoices::Column::StripeInvoiceId.eq(stripe_invoice_id))
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新账单状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ==================== 用量 ====================

    pub async fn record_usage_metric_impl(
        &self,
        admin_id: i64,
        metric_name: &str,
        metric_value: i64,
    ) -> Result<UsageMetric> {
        let model = usage_metrics::ActiveModel {
            admin_id: Set(admin_id),
            metric_name: Set(metric_name.to_string()),
            metric_value: Set(metric_value),
            recorded_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("记录用量失败: {e}")))?;

        Ok(result.into_metric())
    }

    pub async fn list_usage_metrics_impl(&self, admin_id: i64) -> Result<Vec<UsageMetric>> {
        let rows = usage_metrics::Entity::find()
            .filter(usage_metrics::Column::AdminId.eq(admin_id))
            .order_by_desc(usage_metrics::Column::RecordedAt)
            .order_by_desc(usage_metrics::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询用量记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_metric()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::subscriptions::{
        entities::BillingInterval,
        requests::{CreatePlanRequest, CreateSubscriptionRequest, UpdateSubscriptionRequest},
    };

    fn plan(name: &str) -> CreatePlanRequest {
        CreatePlanRequest {
            name: name.into(),
            description: None,
            price: 299.0,
            billing_interval: BillingInterval::Monthly,
            features: vec!["Support".into(), "Rapports".into()],
            max_students: Some(100),
            max_teachers: Some(10),
            max_courses: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_plan_soft_delete() {
        let storage = memory_storage().await;
        let p = storage.create_plan_impl(plan("Standard")).await.unwrap();
        assert_eq!(p.features, vec!["Support".to_string(), "Rapports".to_string()]);
        assert_eq!(storage.list_active_plans_impl().await.unwrap().len(), 1);

        assert!(storage.deactivate_plan_impl(p.id).await.unwrap());
        assert!(storage.list_active_plans_impl().await.unwrap().is_empty());
        let still_there = storage.get_plan_by_id_impl(p.id).await.unwrap().unwrap();
        assert!(!still_there.is_active);
    }

    #[tokio::test]
    async fn test_subscription_with_invoice_and_scoping() {
        let storage = memory_storage().await;
        let admin = storage.create_admin_impl("direction", "hash").await.unwrap();
        let other = storage.create_admin_impl("compta", "hash").await.unwrap();
        let p = storage.create_plan_impl(plan("Premium")).await.unwrap();

        let (sub, invoice) = storage
            .create_subscription_with_invoice_impl(
                admin.id,
                CreateSubscriptionRequest {
                    plan_id: p.id,
                    status: None,
                    start_date: None,
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: None,
                    stripe_invoice_id: None,
                },
                299.0,
                "INV-0A1B2C3D",
            )
            .await
            .unwrap();
        assert_eq!(sub.status, "pending");
        assert_eq!(invoice.subscription_id, sub.id);
        assert_eq!(invoice.status, "pending");

        assert!(storage.get_active_subscription_impl(admin.id).await.unwrap().is_none());
        storage
            .update_subscription_impl(
                sub.id,
                UpdateSubscriptionRequest {
                    plan_id: None,
                    status: Some("active".into()),
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(
            storage
                .get_active_subscription_impl(admin.id)
                .await
                .unwrap()
                .map(|s| s.id),
            Some(sub.id)
        );

        assert_eq!(storage.list_invoices_by_admin_impl(admin.id).await.unwrap().len(), 1);
        assert!(storage.list_invoices_by_admin_impl(other.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_usage_metrics_newest_first() {
        let storage = memory_storage().await;
        let admin = storage.create_admin_impl("direction", "hash").await.unwrap();
        storage
            .record_usage_metric_impl(admin.id, "students_count", 10)
            .await
            .unwrap();
        storage
            .record_usage_metric_impl(admin.id, "students_count", 11)
            .await
            .unwrap();

        let metrics = storage.list_usage_metrics_impl(admin.id).await.unwrap();
        assert_eq!(metrics[0].metric_value, 11);
    }
}
