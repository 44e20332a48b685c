//! 订阅用量限制
//!
//! 管理员当前有效订阅的套餐上限与实际行数比较；
//! 无有效订阅或上限为空时不做限制。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse};
use tracing::{debug, error, warn};

use crate::errors::Result;
use crate::middlewares::RequireJWT;
use crate::models::subscriptions::entities::{LimitedResource, SubscriptionPlan};
use crate::models::subscriptions::responses::{ResourceUsage, UsageOverview};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 行数严格小于上限才允许新增
pub fn is_within_limit(used: u64, cap: Option<i32>) -> bool {
    match cap {
        None => true,
        Some(cap) => (used as i64) < cap as i64,
    }
}

pub async fn current_count(storage: &Arc<dyn Storage>, resource: LimitedResource) -> Result<u64> {
    match resource {
        LimitedResource::Students => storage.count_students().await,
        LimitedResource::Teachers => storage.count_teachers().await,
        LimitedResource::Courses => storage.count_courses().await,
    }
}

async fn active_plan(
    storage: &Arc<dyn Storage>,
    admin_id: i64,
) -> Result<Option<(i64, SubscriptionPlan)>> {
    let Some(subscription) = storage.get_active_subscription(admin_id).await? else {
        return Ok(None);
    };
    let plan = storage.get_plan_by_id(subscription.plan_id).await?;
    Ok(plan.map(|p| (subscription.id, p)))
}

pub async fn check_limit(
    storage: &Arc<dyn Storage>,
    admin_id: i64,
    resource: LimitedResource,
) -> Result<bool> {
    let Some((_, plan)) = active_plan(storage, admin_id).await? else {
        return Ok(true);
    };
    let cap = resource.cap(&plan);
    if cap.is_none() {
        return Ok(true);
    }
    let used = current_count(storage, resource).await?;
    Ok(is_within_limit(used, cap))
}

/// 记录一次用量快照，失败只记日志
pub async fn track_usage(storage: &Arc<dyn Storage>, admin_id: i64, resource: LimitedResource) {
    let used = match current_count(storage, resource).await {
        Ok(n) => n,
        Err(e) => {
            warn!("Failed to count {} for usage tracking: {}", resource, e);
            return;
        }
    };
    match storage
        .record_usage_metric(admin_id, &resource.metric_name(), used as i64)
        .await
    {
        Ok(_) => debug!("Usage recorded: admin {} {}={}", admin_id, resource, used),
        Err(e) => warn!("Failed to record usage metric: {}", e),
    }
}

async fn resource_usage(
    storage: &Arc<dyn Storage>,
    plan: Option<&SubscriptionPlan>,
    resource: LimitedResource,
) -> Result<ResourceUsage> {
    let used = current_count(storage, resource).await?;
    let limit = plan.and_then(|p| resource.cap(p));
    Ok(ResourceUsage {
        used: used as i64,
        limit,
        allowed: is_within_limit(used, limit),
    })
}

pub async fn usage_overview(storage: &Arc<dyn Storage>, admin_id: i64) -> Result<UsageOverview> {
    let active = active_plan(storage, admin_id).await?;
    let plan = active.as_ref().map(|(_, plan)| plan);

    Ok(UsageOverview {
        subscription_id: active.as_ref().map(|(id, _)| *id),
        plan_name: plan.map(|p| p.name.clone()),
        students: resource_usage(storage, plan, LimitedResource::Students).await?,
        teachers: resource_usage(storage, plan, LimitedResource::Teachers).await?,
        courses: resource_usage(storage, plan, LimitedResource::Courses).await?,
    })
}

/// 新建受限资源前的统一检查，返回当前管理员 ID
pub(crate) async fn ensure_capacity(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    resource: LimitedResource,
) -> std::result::Result<i64, HttpResponse> {
    let Some(admin_id) = RequireJWT::extract_admin_id(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing admin id",
        )));
    };

    match check_limit(storage, admin_id, resource).await {
        Ok(true) => Ok(admin_id),
        Ok(false) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubscriptionLimitExceeded,
            resource.limit_exceeded_message(),
        ))),
        Err(e) => {
            error!("Failed to check subscription limit: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check subscription limit: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subscriptions::entities::BillingInterval;
    use crate::models::subscriptions::requests::{
        CreatePlanRequest, CreateSubscriptionRequest, UpdateSubscriptionRequest,
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[test]
    fn test_is_within_limit() {
        assert!(is_within_limit(100, None));
        assert!(is_within_limit(4, Some(5)));
        assert!(!is_within_limit(5, Some(5)));
        assert!(!is_within_limit(0, Some(0)));
    }

    fn student(name: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: name.to_string(),
            group_id: None,
            email: None,
            phone: None,
            address: None,
            birth_date: None,
            gender: None,
            status: None,
        }
    }

    async fn setup(max_students: Option<i32>) -> (Arc<dyn Storage>, i64) {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let admin = storage.create_admin("owner", "hash").await.unwrap();
        let plan = storage
            .create_plan(CreatePlanRequest {
                name: "Starter".to_string(),
                description: None,
                price: 199.0,
                billing_interval: BillingInterval::Monthly,
                features: vec![],
                max_students,
                max_teachers: None,
                max_courses: None,
                is_active: Some(true),
            })
            .await
            .unwrap();
        let (subscription, _) = storage
            .create_subscription_with_invoice(
                admin.id,
                CreateSubscriptionRequest {
                    plan_id: plan.id,
                    status: None,
                    start_date: None,
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: None,
                    stripe_invoice_id: None,
                },
                199.0,
                "INV-TEST0001",
            )
            .await
            .unwrap();
        storage
            .update_subscription(
                subscription.id,
                UpdateSubscriptionRequest {
                    plan_id: None,
                    status: Some("active".to_string()),
                    end_date: None,
                    auto_renew: None,
                    stripe_subscription_id: None,
                },
            )
            .await
            .unwrap();
        (storage, admin.id)
    }

    #[tokio::test]
    async fn test_no_subscription_is_unlimited() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let admin = storage.create_admin("free", "hash").await.unwrap();
        assert!(
            check_limit(&storage, admin.id, LimitedResource::Students)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_cap_blocks_when_reached() {
        let (storage, admin_id) = setup(Some(1)).await;
        assert!(
            check_limit(&storage, admin_id, LimitedResource::Students)
                .await
                .unwrap()
        );

        storage.create_student(student("Salma")).await.unwrap();
        assert!(
            !check_limit(&storage, admin_id, LimitedResource::Students)
                .await
                .unwrap()
        );
        // 教师没有上限
        assert!(
            check_limit(&storage, admin_id, LimitedResource::Teachers)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_track_usage_and_overview() {
        let (storage, admin_id) = setup(Some(10)).await;
        storage.create_student(student("Omar")).await.unwrap();
        track_usage(&storage, admin_id, LimitedResource::Students).await;

        let metrics = storage.list_usage_metrics(admin_id).await.unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].metric_name, "students_count");
        assert_eq!(metrics[0].metric_value, 1);

        let overview = usage_overview(&storage, admin_id).await.unwrap();
        assert_eq!(overview.plan_name.as_deref(), Some("Starter"));
        assert_eq!(overview.students.used, 1);
        assert_eq!(overview.students.limit, Some(10));
        assert!(overview.students.allowed);
        assert_eq!(overview.teachers.limit, None);
    }
}
