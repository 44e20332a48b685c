pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端异常，按未命中处理
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用配置的默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 读取并反序列化缓存对象，反序列化失败时清除该键
pub async fn get_object<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Discarding undecodable cache entry '{}': {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

pub async fn insert_object<T: Serialize>(cache: &dyn ObjectCache, key: &str, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key.to_string(), json, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
    }
}

/// 声明缓存插件，进程启动时注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::EduManageError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MapCache {
        inner: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl ObjectCache for MapCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            match self.inner.lock().await.get(key) {
                Some(v) => CacheResult::Found(v.clone()),
                None => CacheResult::NotFound,
            }
        }

        async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
            self.inner.lock().await.insert(key, value);
        }

        async fn remove(&self, key: &str) {
            self.inner.lock().await.remove(key);
        }

        async fn invalidate_all(&self) {
            self.inner.lock().await.clear();
        }
    }

    #[tokio::test]
    async fn test_object_roundtrip_and_bad_entry_eviction() {
        let cache = MapCache::default();
        insert_object(&cache, "admin:t", &vec![1, 2, 3], 0).await;
        let got: Option<Vec<i32>> = get_object(&cache, "admin:t").await;
        assert_eq!(got, Some(vec![1, 2, 3]));

        cache
            .insert_raw("admin:bad".into(), "not json".into(), 0)
            .await;
        let bad: Option<Vec<i32>> = get_object(&cache, "admin:bad").await;
        assert!(bad.is_none());
        assert_eq!(cache.get_raw("admin:bad").await, CacheResult::NotFound);
    }
}
