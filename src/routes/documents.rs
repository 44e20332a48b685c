use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::documents::requests::{
    DocumentListQuery, GenerateDocumentRequest, UpdateDocumentRequest,
};
use crate::services::DocumentService;
use crate::utils::SafeDocumentIdI64;

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

pub async fn generate_document(
    req: HttpRequest,
    document_data: web::Json<GenerateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .generate_document(document_data.into_inner(), &req)
        .await
}

pub async fn list_documents(
    req: HttpRequest,
    query: web::Query<DocumentListQuery>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .list_documents(query.into_inner(), &req)
        .await
}

pub async fn get_document(
    req: HttpRequest,
    document_id: SafeDocumentIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.get_document(document_id.0, &req).await
}

pub async fn update_document(
    req: HttpRequest,
    document_id: SafeDocumentIdI64,
    update_data: web::Json<UpdateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .update_document(document_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_document(
    req: HttpRequest,
    document_id: SafeDocumentIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.delete_document(document_id.0, &req).await
}

// 配置路由
pub fn configure_documents_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/documents")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_documents))
            .route("/generate", web::post().to(generate_document))
            .service(
                web::resource("/{document_id}")
                    .route(web::get().to(get_document))
                    .route(web::put().to(update_document))
                    .route(web::delete().to(delete_document)),
            ),
    );
}
