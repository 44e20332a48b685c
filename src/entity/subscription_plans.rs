//! 订阅套餐实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub billing_interval: String,
    pub features: Option<Json>,
    pub max_students: Option<i32>,
    pub max_teachers: Option<i32>,
    pub max_courses: Option<i32>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subscriptions::Entity")]
    Subscriptions,
}

impl Related<super::subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_plan(self) -> crate::models::subscriptions::entities::SubscriptionPlan {
        use crate::models::subscriptions::entities::{BillingInterval, SubscriptionPlan};
        use chrono::{DateTime, Utc};

        // features 以 JSON 字符串数组存储，非字符串元素忽略
        let features = self
            .features
            .and_then(|v| v.as_array().cloned())
            .map(|items| {
                items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        SubscriptionPlan {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            billing_interval: self
                .billing_interval
                .parse::<BillingInterval>()
                .unwrap_or(BillingInterval::Monthly),
            features,
            max_students: self.max_students,
            max_teachers: self.max_teachers,
            max_courses: self.max_courses,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
