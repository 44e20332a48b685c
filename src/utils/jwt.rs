//! 管理员令牌
//!
//! access token 走 `Authorization: Bearer`，refresh token 只放在 HttpOnly cookie 中。
//! 两者共用密钥，以 `kind` 字段区分，混用时校验失败。

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 管理员 ID
    pub username: String,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn admin_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| JwtError::from(ErrorKind::InvalidSubject))
    }
}

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn encode_token(
    secret: &str,
    admin_id: i64,
    username: &str,
    kind: TokenKind,
    ttl: Duration,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id.to_string(),
        username: username.to_string(),
        kind,
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(secret: &str, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;
    if claims.kind != expected {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    pub fn access_ttl() -> Duration {
        Duration::minutes(AppConfig::get().jwt.access_token_expiry)
    }

    fn refresh_days(remember_me: bool) -> i64 {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            jwt.refresh_token_remember_me_expiry
        } else {
            jwt.refresh_token_expiry
        }
    }

    pub fn generate_access_token(admin_id: i64, username: &str) -> Result<String, JwtError> {
        encode_token(
            Self::secret(),
            admin_id,
            username,
            TokenKind::Access,
            Self::access_ttl(),
        )
    }

    /// 登录时签发；remember_me 使用更长的 refresh 有效期
    pub fn generate_token_pair(
        admin_id: i64,
        username: &str,
        remember_me: bool,
    ) -> Result<TokenPair, JwtError> {
        let refresh_days = Self::refresh_days(remember_me);
        Ok(TokenPair {
            access_token: Self::generate_access_token(admin_id, username)?,
            refresh_token: encode_token(
                Self::secret(),
                admin_id,
                username,
                TokenKind::Refresh,
                Duration::days(refresh_days),
            )?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, JwtError> {
        decode_token(Self::secret(), token, TokenKind::Access)
    }

    /// 用 refresh token 换新的 access token
    pub fn refresh_access_token(refresh_token: &str) -> Result<String, JwtError> {
        let claims = decode_token(Self::secret(), refresh_token, TokenKind::Refresh)?;
        Self::generate_access_token(claims.admin_id()?, &claims.username)
    }

    pub fn refresh_cookie(refresh_token: &str, remember_me: bool) -> Cookie<'static> {
        Self::cookie(
            refresh_token.to_string(),
            actix_web::cookie::time::Duration::days(Self::refresh_days(remember_me)),
        )
    }

    /// 清除 cookie
    pub fn expired_refresh_cookie() -> Cookie<'static> {
        Self::cookie(String::new(), actix_web::cookie::time::Duration::ZERO)
    }

    fn cookie(value: String, max_age: actix_web::cookie::time::Duration) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, value)
            .path("/api/v1/auth")
            .max_age(max_age)
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn refresh_token_from(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_roundtrip_keeps_admin() {
        let token = encode_token(SECRET, 7, "admin", TokenKind::Access, Duration::minutes(5))
            .unwrap();
        let claims = decode_token(SECRET, &token, TokenKind::Access).unwrap();
        assert_eq!(claims.admin_id().unwrap(), 7);
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let refresh =
            encode_token(SECRET, 1, "admin", TokenKind::Refresh, Duration::days(1)).unwrap();
        assert!(decode_token(SECRET, &refresh, TokenKind::Access).is_err());
    }

    #[test]
    fn test_wrong_secret_and_expiry() {
        let token =
            encode_token(SECRET, 1, "admin", TokenKind::Access, Duration::minutes(5)).unwrap();
        assert!(decode_token("other", &token, TokenKind::Access).is_err());

        // 超出默认 60 秒容差
        let expired =
            encode_token(SECRET, 1, "admin", TokenKind::Access, Duration::minutes(-5)).unwrap();
        assert!(decode_token(SECRET, &expired, TokenKind::Access).is_err());
    }
}
