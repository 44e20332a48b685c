use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::DocumentService;
use crate::config::AppConfig;
use crate::errors::EduManageError;
use crate::models::documents::requests::GenerateDocumentRequest;
use crate::models::documents::responses::GenerateDocumentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::pdf::document::render_document;
use crate::storage::NewDocument;

pub async fn generate_document(
    service: &DocumentService,
    document_data: GenerateDocumentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student_name = match document_data.student_id {
        Some(student_id) => match storage.get_student_by_id(student_id).await {
            Ok(Some(student)) => Some(student.full_name),
            Ok(None) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotFound,
                    "Student not found",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to get student: {e}"),
                    )),
                );
            }
        },
        None => None,
    };

    let config = AppConfig::get();
    let dir = config.storage.documents_path();
    let doc_type = document_data.doc_type.clone();
    let meta = document_data.meta.clone();
    let signed = document_data.signed;
    let rendered = actix_web::web::block(move || {
        render_document(&dir, &doc_type, student_name.as_deref(), meta.as_ref(), signed)
    })
    .await
    .map_err(|e| EduManageError::document_render(format!("Document task failed: {e}")))
    .and_then(|r| r);

    let path = match rendered {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            error!("Document rendering failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::DocumentRenderFailed,
                    format!("Document rendering failed: {e}"),
                )),
            );
        }
    };

    let new_document = NewDocument {
        doc_type: document_data.doc_type,
        student_id: document_data.student_id,
        file_path: Some(path.clone()),
        signed: document_data.signed,
        meta: document_data.meta,
    };

    match storage.create_document(new_document).await {
        Ok(document) => {
            info!("Document {} generated: {}", document.id, path);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GenerateDocumentResponse {
                    document,
                    file_url: config.storage.public_url(&path),
                },
                "Document generated successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to save document: {e}"),
            )),
        ),
    }
}
