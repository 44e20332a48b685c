use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::models::documents::requests::UpdateDocumentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_document(
    service: &DocumentService,
    document_id: i64,
    update_data: UpdateDocumentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_document(document_id, update_data).await {
        Ok(Some(document)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            document,
            "Document updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DocumentNotFound,
            "Document not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Document update failed: {e}"),
            )),
        ),
    }
}
