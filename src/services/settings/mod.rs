pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::settings::requests::UpdateSettingsRequest;
use crate::storage::Storage;

pub struct SettingsService {
    storage: Option<Arc<dyn Storage>>,
}

impl SettingsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 机构设置，不存在时写入默认值
    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_settings(self, request).await
    }

    pub async fn update_settings(
        &self,
        update_data: UpdateSettingsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_settings(self, update_data, request).await
    }
}
