//! 用量记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usage_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub admin_id: i64,
    pub metric_name: String,
    pub metric_value: i64,
    pub recorded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::admins::Entity",
        from = "Column::AdminId",
        to = "super::admins::Column::Id"
    )]
    Admin,
}

impl Related<super::admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Admin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_metric(self) -> crate::models::subscriptions::entities::UsageMetric {
        use chrono::{DateTime, Utc};

        crate::models::subscriptions::entities::UsageMetric {
            id: self.id,
            admin_id: self.admin_id,
            metric_name: self.metric_name,
            metric_value: self.metric_value,
            recorded_at: DateTime::<Utc>::from_timestamp(self.recorded_at, 0)
                .unwrap_or_default(),
        }
    }
}
