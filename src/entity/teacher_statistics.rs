//! 教师统计实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub teacher_id: i64,
    pub total_students: i32,
    pub total_subjects: i32,
    pub years_experience: i32,
    pub satisfaction_score: f64,
    pub average_rating: f64,
    pub total_feedback_count: i32,
    pub teaching_quality: f64,
    pub course_content_rating: f64,
    pub communication_rating: f64,
    pub helpfulness_rating: f64,
    pub attendance_rate: f64,
    pub grade_improvement: f64,
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
    pub fn into_statistics(self) -> crate::models::teachers::entities::TeacherStatistics {
        crate::models::teachers::entities::TeacherStatistics {
            teacher_id: self.teacher_id,
            total_students: self.total_students,
            total_subjects: self.total_subjects,
            years_experience: self.years_experience,
            satisfaction_score: self.satisfaction_score,
            average_rating: self.average_rating,
            total_feedback_count: self.total_feedback_count,
            teaching_quality: self.teaching_quality,
            course_content_rating: self.course_content_rating,
            communication_rating: self.communication_rating,
            helpfulness_rating: self.helpfulness_rating,
            attendance_rate: self.attendance_rate,
            grade_improvement: self.grade_improvement,
        }
    }
}
