//! 报表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub report_type: String,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    pub file_path: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_report(self) -> crate::models::reports::entities::Report {
        use chrono::{DateTime, Utc};

        crate::models::reports::entities::Report {
            id: self.id,
            report_type: self.report_type,
            period_start: self.period_start,
            period_end: self.period_end,
            file_path: self.file_path,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
