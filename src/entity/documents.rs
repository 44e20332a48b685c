//! 文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "type")]
    pub doc_type: String,
    pub student_id: Option<i64>,
    pub file_path: Option<String>,
    pub signed: bool,
    pub meta: Option<Json>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_document(self) -> crate::models::documents::entities::Document {
        use chrono::{DateTime, Utc};

        crate::models::documents::entities::Document {
            id: self.id,
            doc_type: self.doc_type,
            student_id: self.student_id,
            file_path: self.file_path,
            signed: self.signed,
            meta: self.meta,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
