pub mod delete;
pub mod generate;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::documents::requests::{
    DocumentListQuery, GenerateDocumentRequest, UpdateDocumentRequest,
};
use crate::storage::Storage;

pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DocumentService {
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

    // 生成证明文件
    pub async fn generate_document(
        &self,
        document_data: GenerateDocumentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_document(self, document_data, request).await
    }

    pub async fn list_documents(
        &self,
        query: DocumentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_documents(self, query, request).await
    }

    pub async fn get_document(
        &self,
        document_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_document(self, document_id, request).await
    }

    pub async fn update_document(
        &self,
        document_id: i64,
        update_data: UpdateDocumentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_document(self, document_id, update_data, request).await
    }

    pub async fn delete_document(
        &self,
        document_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_document(self, document_id, request).await
    }
}
