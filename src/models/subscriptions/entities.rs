use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 计费周期
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub enum BillingInterval {
    Monthly,
    Yearly,
}

impl BillingInterval {
    pub const MONTHLY: &'static str = "monthly";
    pub const YEARLY: &'static str = "yearly";

    /// 从开始日期推算到期日期
    pub fn end_date_from(&self, start: NaiveDate) -> Option<NaiveDate> {
        match self {
            BillingInterval::Monthly => start.checked_add_months(Months::new(1)),
            BillingInterval::Yearly => start.checked_add_months(Months::new(12)),
        }
    }
}

impl<'de> Deserialize<'de> for BillingInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid billing interval: '{s}'. Expected one of: monthly, yearly"
            ))
        })
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillingInterval::Monthly => write!(f, "{}", BillingInterval::MONTHLY),
            BillingInterval::Yearly => write!(f, "{}", BillingInterval::YEARLY),
        }
    }
}

impl std::str::FromStr for BillingInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            BillingInterval::MONTHLY => Ok(BillingInterval::Monthly),
            BillingInterval::YEARLY => Ok(BillingInterval::Yearly),
            _ => Err(format!("Invalid billing interval: {s}")),
        }
    }
}

pub const SUBSCRIPTION_STATUS_ACTIVE: &str = "active";
pub const SUBSCRIPTION_STATUS_PENDING: &str = "pending";
pub const SUBSCRIPTION_STATUS_PAST_DUE: &str = "past_due";
pub const SUBSCRIPTION_STATUS_CANCELLED: &str = "cancelled";

pub const INVOICE_STATUS_PENDING: &str = "pending";
pub const INVOICE_STATUS_PAID: &str = "paid";
pub const INVOICE_STATUS_FAILED: &str = "failed";

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionPlan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub billing_interval: BillingInterval,
    pub features: Vec<String>,
    pub max_students: Option<i32>, // None 表示不限
    pub max_teachers: Option<i32>,
    pub max_courses: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct Subscription {
    pub id: i64,
    pub admin_id: i64,
    pub plan_id: i64,
    pub status: String, // pending / active / past_due / cancelled / expired
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub auto_renew: bool,
    pub stripe_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct SubscriptionInvoice {
    pub id: i64,
    pub subscription_id: i64,
    pub amount: f64,
    pub status: String, // pending / paid / failed
    pub billing_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub invoice_number: String,
    pub stripe_invoice_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub struct UsageMetric {
    pub id: i64,
    pub admin_id: i64,
    pub metric_name: String,
    pub metric_value: i64,
    pub recorded_at: DateTime<Utc>,
}

/// 受套餐上限约束的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/subscription.ts")]
pub enum LimitedResource {
    Students,
    Teachers,
    Courses,
}

impl LimitedResource {
    pub const ALL: [LimitedResource; 3] = [
        LimitedResource::Students,
        LimitedResource::Teachers,
        LimitedResource::Courses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitedResource::Students => "students",
            LimitedResource::Teachers => "teachers",
            LimitedResource::Courses => "courses",
        }
    }

    /// 单数形式，用于错误提示
    pub fn singular(&self) -> &'static str {
        match self {
            LimitedResource::Students => "student",
            LimitedResource::Teachers => "teacher",
            LimitedResource::Courses => "course",
        }
    }

    pub fn metric_name(&self) -> String {
        format!("{}_count", self.as_str())
    }

    pub fn cap(&self, plan: &SubscriptionPlan) -> Option<i32> {
        match self {
            LimitedResource::Students => plan.max_students,
            LimitedResource::Teachers => plan.max_teachers,
            LimitedResource::Courses => plan.max_courses,
        }
    }

    pub fn limit_exceeded_message(&self) -> String {
        format!(
            "Cannot create new {}: Would exceed subscription limit",
            self.singular()
        )
    }
}

impl std::fmt::Display for LimitedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_interval_end_date() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            BillingInterval::Monthly.end_date_from(start),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(
            BillingInterval::Yearly.end_date_from(start),
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
    }

    #[test]
    fn test_billing_interval_serde() {
        let v: BillingInterval = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(v, BillingInterval::Yearly);
        assert!(serde_json::from_str::<BillingInterval>("\"weekly\"").is_err());
    }

    #[test]
    fn test_limited_resource_names() {
        assert_eq!(LimitedResource::Students.metric_name(), "students_count");
        assert_eq!(
            LimitedResource::Teachers.limit_exceeded_message(),
            "Cannot create new teacher: Would exceed subscription limit"
        );
    }
}
