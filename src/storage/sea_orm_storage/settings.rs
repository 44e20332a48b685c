use super::{SeaOrmStorage, now_ts};
use crate::entity::institution_settings::{ActiveModel, Column, Entity as InstitutionSettingsTable};
use crate::errors::{EduManageError, Result};
use crate::models::settings::{
    entities::InstitutionSettings, requests::UpdateSettingsRequest,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 机构设置只有一行
    pub async fn get_settings_impl(&self) -> Result<Option<InstitutionSettings>> {
        let result = InstitutionSettingsTable::find()
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询机构设置失败: {e}")))?;

        Ok(result.map(|m| m.into_settings()))
    }

    pub async fn create_default_settings_impl(&self) -> Result<InstitutionSettings> {
        let model = ActiveModel {
            name: Set("École Privée Excellence".to_string()),
            address: Set("123 Avenue Mohammed V, Casablanca, Maroc".to_string()),
            phone: Set("+212 522 123 456".to_string()),
            email: Set("contact@excellence.ma".to_string()),
            time_zone: Set("Africa/Casablanca".to_string()),
            language: Set("fr".to_string()),
            dark_mode: Set(false),
            font_size: Set("medium".to_string()),
            auto_print: Set(true),
            logo_data_url: Set(String::new()),
            location: Set("Casablanca, Maroc".to_string()),
            logo_path: Set(None),
            academic_year: Set(None),
            current_semester: Set(None),
            grading_scale: Set(None),
            attendance_types: Set(None),
            payment_methods: Set(None),
            document_types: Set(None),
            event_types: Set(None),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建默认设置失败: {e}")))?;

        Ok(result.into_settings())
    }

    pub async fn update_settings_impl(
        &self,
        update: UpdateSettingsRequest,
    ) -> Result<Option<InstitutionSettings>> {
        let Some(current) = self.get_settings_impl().await? else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(current.id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(address) = update.address {
            model.address = Set(address);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(time_zone) = update.time_zone {
            model.time_zone = Set(time_zone);
        }
        if let Some(language) = update.language {
            model.language = Set(language);
        }
        if let Some(dark_mode) = update.dark_mode {
            model.dark_mode = Set(dark_mode);
        }
        if let Some(font_size) = update.font_size {
            model.font_size = Set(font_size);
        }
        if let Some(auto_print) = update.auto_print {
            model.auto_print = Set(auto_print);
        }
        if let Some(logo_data_url) = update.logo_data_url {
            model.logo_data_url = Set(logo_data_url);
        }
        if let Some(location) = update.location {
            model.location = Set(location);
        }
        if let Some(logo_path) = update.logo_path {
            model.logo_path = Set(Some(logo_path));
        }
        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(Some(academic_year));
        }
        if let Some(current_semester) = update.current_semester {
            model.current_semester = Set(Some(current_semester));
        }
        if let Some(grading_scale) = update.grading_scale {
            model.grading_scale = Set(Some(grading_scale));
        }
        if let Some(attendance_types) = update.attendance_types {
            model.attendance_types = Set(Some(attendance_types));
        }
        if let Some(payment_methods) = update.payment_methods {
            model.payment_methods = Set(Some(payment_methods));
        }
        if let Some(document_types) = update.document_types {
            model.document_types = Set(Some(document_types));
        }
        if let Some(event_types) = update.event_types {
            model.event_types = Set(Some(event_types));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新机构设置失败: {e}")))?;

        Ok(Some(result.into_settings()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::settings::requests::UpdateSettingsRequest;
    use serde_json::json;

    #[tokio::test]
    async fn test_settings_defaults_and_partial_update() {
        let storage = memory_storage().await;
        assert!(storage.get_settings_impl().await.unwrap().is_none());
        assert!(
            storage
                .update_settings_impl(UpdateSettingsRequest::default())
                .await
                .unwrap()
                .is_none()
        );

        let defaults = storage.create_default_settings_impl().await.unwrap();
        assert_eq!(defaults.name, "École Privée Excellence");
        assert_eq!(defaults.time_zone, "Africa/Casablanca");
        assert!(!defaults.dark_mode);
        assert!(defaults.auto_print);

        let updated = storage
            .update_settings_impl(UpdateSettingsRequest {
                academic_year: Some("2024-2025".into()),
                payment_methods: Some(json!(["cash", "card"])),
                ..Default::default()
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.academic_year.as_deref(), Some("2024-2025"));
        assert_eq!(updated.payment_methods, Some(json!(["cash", "card"])));
        assert_eq!(updated.phone, "+212 522 123 456");
    }
}
