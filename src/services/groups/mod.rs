pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::groups::requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest};
use crate::storage::Storage;

pub struct GroupService {
    storage: Option<Arc<dyn Storage>>,
}

impl GroupService {
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

    // 获取班级列表
    pub async fn list_groups(
        &self,
        query: GroupListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_groups(self, query, request).await
    }

    pub async fn create_group(
        &self,
        group_data: CreateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_group(self, group_data, request).await
    }

    pub async fn get_group(&self, group_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_group(self, group_id, request).await
    }

    pub async fn update_group(
        &self,
        group_id: i64,
        update_data: UpdateGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_group(self, group_id, update_data, request).await
    }

    // 删除班级（学生与课程的班级引用置空）
    pub async fn delete_group(
        &self,
        group_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_group(self, group_id, request).await
    }
}
