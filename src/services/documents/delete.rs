use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::models::{ApiResponse, ErrorCode, OkResponse};

pub async fn delete_document(
    service: &DocumentService,
    document_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_document(document_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OkResponse::ok(),
            "Document deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DocumentNotFound,
            "Document not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Document deletion failed: {e}"),
            )),
        ),
    }
}
