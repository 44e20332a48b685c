//! 机构设置实体（单行）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "institution_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub time_zone: String,
    pub language: String,
    pub dark_mode: bool,
    pub font_size: String,
    pub auto_print: bool,
    #[sea_orm(column_type = "Text")]
    pub logo_data_url: String,
    pub location: String,
    pub logo_path: Option<String>,
    pub academic_year: Option<String>,
    pub current_semester: Option<String>,
    pub grading_scale: Option<Json>,
    pub attendance_types: Option<Json>,
    pub payment_methods: Option<Json>,
    pub document_types: Option<Json>,
    pub event_types: Option<Json>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_settings(self) -> crate::models::settings::entities::InstitutionSettings {
        crate::models::settings::entities::InstitutionSettings {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            time_zone: self.time_zone,
            language: self.language,
            dark_mode: self.dark_mode,
            font_size: self.font_size,
            auto_print: self.auto_print,
            logo_data_url: self.logo_data_url,
            location: self.location,
            logo_path: self.logo_path,
            academic_year: self.academic_year,
            current_semester: self.current_semester,
            grading_scale: self.grading_scale,
            attendance_types: self.attendance_types,
            payment_methods: self.payment_methods,
            document_types: self.document_types,
            event_types: self.event_types,
        }
    }
}
