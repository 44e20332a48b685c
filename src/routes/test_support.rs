//! 路由测试共用：内存库、已登录管理员和参数错误处理

use actix_web::web;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::storage::Storage;
use crate::storage::sea_orm_storage::test_support::memory_storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::{json_error_handler, query_error_handler};

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub admin_id: i64,
    token: String,
}

/// 用 JSON 构造请求体，省去逐字段书写 Option
pub fn from_json<T: DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

impl TestContext {
    pub async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let admin = storage
            .create_admin("admin", "not-a-real-hash")
            .await
            .unwrap();
        let token = JwtUtils::generate_access_token(admin.id, &admin.username).unwrap();
        Self {
            storage,
            admin_id: admin.id,
            token,
        }
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }

    /// 与 main 中一致的 app_data
    pub fn app_data(&self) -> impl FnOnce(&mut web::ServiceConfig) + 'static {
        let storage = self.storage.clone();
        move |cfg| {
            cfg.app_data(web::Data::new(storage))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler));
        }
    }
}
