/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后把当前管理员放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students));
 *
 * async fn handler(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let admin_id = RequireJWT::extract_admin_id(&req);
 *     // ...
 * }
 * ```
 *
 * 认证结果按 token 缓存（`admin:{token}`），过期时间取 `cache.default_ttl`。
 */

use super::create_error_response;
use crate::cache::{ObjectCache, get_object, insert_object};
use crate::config::AppConfig;
use crate::models::admins::entities::Admin;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

fn admin_cache_key(token: &str) -> String {
    format!("admin:{token}")
}

fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

// 提取并验证 access token，返回对应管理员
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Admin, String> {
    let token = bearer_token(
        req.headers()
            .get(AUTHORIZATION_HEADER)
            .and_then(|h| h.to_str().ok()),
    )
    .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    if let Some(ref cache) = cache
        && let Some(admin) = get_object::<Admin>(cache.as_ref(), &admin_cache_key(token)).await
    {
        return Ok(admin);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Storage not available".to_string())?;

    let admin_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| "Invalid admin ID in JWT".to_string())?;

    let admin = storage
        .get_admin_by_id(admin_id)
        .await
        .map_err(|_| "Failed to retrieve admin from storage".to_string())?
        .ok_or_else(|| "Admin not found".to_string())?;

    if let Some(cache) = cache {
        insert_object(
            cache.as_ref(),
            &admin_cache_key(token),
            &admin,
            AppConfig::get().cache.default_ttl,
        )
        .await;
    }

    Ok(admin)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(admin) => {
                    debug!("JWT authentication successful for admin ID: {}", admin.id);
                    req.extensions_mut().insert(admin);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前管理员（需在 RequireJWT 保护的路由中调用）
    pub fn extract_admin(req: &actix_web::HttpRequest) -> Option<Admin> {
        req.extensions().get::<Admin>().cloned()
    }

    pub fn extract_admin_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Admin>().map(|admin| admin.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("Basic xyz")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_cache_key_is_namespaced() {
        assert_eq!(admin_cache_key("tok"), "admin:tok");
    }
}
