pub mod files;
pub mod health;
pub mod info;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct SystemService {
    storage: Option<Arc<dyn Storage>>,
}

impl SystemService {
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

    // 数据库连通性检查
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(self, request).await
    }

    pub async fn system_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::system_info(self, request).await
    }

    pub async fn check_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::check_settings(self, request).await
    }

    // 生成文件的公开访问
    pub async fn serve_storage_file(
        &self,
        file_path: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        files::serve_storage_file(file_path, request).await
    }
}
