//! 评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub rating: i32,
    pub satisfaction_score: i32,
    pub teaching_quality: i32,
    pub course_content: i32,
    pub communication: i32,
    pub helpfulness: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_feedback(self) -> crate::models::feedback::entities::Feedback {
        use chrono::{DateTime, Utc};

        crate::models::feedback::entities::Feedback {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            course_id: self.course_id,
            rating: self.rating,
            satisfaction_score: self.satisfaction_score,
            teaching_quality: self.teaching_quality,
            course_content: self.course_content,
            communication: self.communication,
            helpfulness: self.helpfulness,
            comments: self.comment,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
