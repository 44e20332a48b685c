//! 登录、注册、刷新令牌的限流
//!
//! 固定窗口计数：键为 `前缀:窗口序号:客户端`，窗口序号 = 当前秒数 / 窗口长度，
//! 过期窗口的计数由缓存 TTL 清理。客户端优先取管理员 ID，其次取真实 IP。
//! 超限返回 429 并带 `Retry-After`（距窗口结束的秒数）。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use chrono::Utc;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::admins::entities::Admin;
use crate::models::{ApiResponse, ErrorCode};

// 最长窗口为 1 小时
static COUNTERS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    scope: &'static str,
}

impl RateLimit {
    pub fn new(scope: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.max(1),
            scope,
        }
    }

    /// 5 次/分钟
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 3 次/分钟
    pub fn register() -> Self {
        Self::new("register", 3, 60)
    }

    /// 10 次/分钟
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    fn window_index(&self, now_secs: u64) -> u64 {
        now_secs / self.window_secs
    }

    fn counter_key(&self, client: &str, now_secs: u64) -> String {
        format!("{}:{}:{}", self.scope, self.window_index(now_secs), client)
    }

    fn retry_after(&self, now_secs: u64) -> u64 {
        self.window_secs - now_secs % self.window_secs
    }
}

fn client_identity(req: &ServiceRequest) -> String {
    if let Some(admin) = req.extensions().get::<Admin>() {
        return format!("admin:{}", admin.id);
    }
    // realip_remote_addr 已处理 Forwarded / X-Forwarded-For
    let info = req.connection_info();
    let ip = info
        .realip_remote_addr()
        .and_then(parse_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("ip:{ip}")
}

/// 接受纯 IP 或 `ip:port`
fn parse_ip(addr: &str) -> Option<IpAddr> {
    let addr = addr.trim();
    addr.parse::<IpAddr>()
        .ok()
        .or_else(|| addr.parse::<std::net::SocketAddr>().ok().map(|s| s.ip()))
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::TooManyRequests()
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header((REMAINING_HEADER, "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let now = Utc::now().timestamp().max(0) as u64;
            let key = limit.counter_key(&client_identity(&req), now);
            let used = COUNTERS.get(&key).await.unwrap_or(0);

            if used >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, used, limit.max_requests
                );
                let response = too_many_requests(limit.retry_after(now));
                return Ok(req.into_response(response.map_into_right_body()));
            }
            COUNTERS.insert(key, used + 1).await;

            let mut res = srv.call(req).await?;
            let remaining = limit.max_requests.saturating_sub(used + 1);
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static(LIMIT_HEADER),
                HeaderValue::from(limit.max_requests),
            );
            headers.insert(
                HeaderName::from_static(REMAINING_HEADER),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!((login.max_requests, login.window_secs), (5, 60));
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
    }

    #[test]
    fn test_counter_key_rolls_with_window() {
        let limit = RateLimit::login();
        assert_eq!(limit.counter_key("ip:1.2.3.4", 119), "login:1:ip:1.2.3.4");
        assert_eq!(limit.counter_key("ip:1.2.3.4", 120), "login:2:ip:1.2.3.4");
        assert_eq!(limit.retry_after(119), 1);
        assert_eq!(limit.retry_after(120), 60);
    }

    #[test]
    fn test_zero_window_is_clamped() {
        let limit = RateLimit::new("x", 1, 0);
        assert_eq!(limit.window_secs, 1);
    }

    #[test]
    fn test_parse_ip() {
        assert_eq!(parse_ip("10.0.0.1"), "10.0.0.1".parse().ok());
        assert_eq!(parse_ip("10.0.0.1:8080"), "10.0.0.1".parse().ok());
        assert_eq!(parse_ip("[::1]:443"), "::1".parse().ok());
        assert!(parse_ip("not-an-ip").is_none());
    }
}
