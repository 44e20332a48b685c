use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_document(
    service: &DocumentService,
    document_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_document_by_id(document_id).await {
        Ok(Some(document)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            document,
            "Document retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DocumentNotFound,
            "Document not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get document: {e}"),
            )),
        ),
    }
}
