//! 订阅账单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription_invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subscription_id: i64,
    pub amount: f64,
    pub status: String,
    pub billing_date: Date,
    pub paid_date: Option<Date>,
    pub payment_method: Option<String>,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub stripe_invoice_id: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscriptions::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscriptions::Column::Id"
    )]
    Subscription,
}

impl Related<super::subscriptions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invoice(self) -> crate::models::subscriptions::entities::SubscriptionInvoice {
        use chrono::{DateTime, Utc};

        crate::models::subscriptions::entities::SubscriptionInvoice {
            id: self.id,
            subscription_id: self.subscription_id,
            amount: self.amount,
            status: self.status,
            billing_date: self.billing_date,
            paid_date: self.paid_date,
            payment_method: self.payment_method,
            invoice_number: self.invoice_number,
            stripe_invoice_id: self.stripe_invoice_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
