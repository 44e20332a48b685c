use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{EduManageError, Result};
use crate::models::documents::{
    entities::{Document, DocumentListResponse},
    requests::{DocumentListQuery, UpdateDocumentRequest},
};
use crate::storage::NewDocument;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_document_impl(&self, doc: NewDocument) -> Result<Document> {
        let model = ActiveModel {
            doc_type: Set(doc.doc_type),
            student_id: Set(doc.student_id),
            file_path: Set(doc.file_path),
            signed: Set(doc.signed),
            meta: Set(doc.meta),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建文档失败: {e}")))?;

        Ok(result.into_document())
    }

    pub async fn get_document_by_id_impl(&self, id: i64) -> Result<Option<Document>> {
        let result = Documents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询文档失败: {e}")))?;

        Ok(result.map(|m| m.into_document()))
    }

    pub async fn list_documents_with_pagination_impl(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Documents::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(ref doc_type) = query.doc_type {
            select = select.filter(Column::DocType.eq(doc_type.as_str()));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "文档", |m| m.into_document())
            .await
    }

    pub async fn update_document_impl(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        if self.get_document_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(signed) = update.signed {
            model.signed = Set(signed);
        }
        if let Some(meta) = update.meta {
            model.meta = Set(Some(meta));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新文档失败: {e}")))?;

        Ok(Some(result.into_document()))
    }

    pub async fn delete_document_impl(&self, id: i64) -> Result<bool> {
        let result = Documents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::documents::requests::UpdateDocumentRequest;
    use crate::storage::NewDocument;
    use serde_json::json;

    #[tokio::test]
    async fn test_document_meta_round_trips_through_json_column() {
        let storage = memory_storage().await;
        let doc = storage
            .create_document_impl(NewDocument {
                doc_type: "certificate".into(),
                student_id: None,
                file_path: Some("documents/document_certificate_1.pdf".into()),
                signed: false,
                meta: Some(json!({"motif": "inscription"})),
            })
            .await
            .unwrap();
        assert_eq!(doc.meta, Some(json!({"motif": "inscription"})));

        let signed = storage
            .update_document_impl(
                doc.id,
                UpdateDocumentRequest {
                    signed: Some(true),
                    meta: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(signed.signed);
        assert_eq!(signed.meta, Some(json!({"motif": "inscription"})));
    }
}
