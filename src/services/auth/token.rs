use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::admins::responses::{AdminInfoResponse, TokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;
use super::login::TOKEN_TYPE;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let Some(refresh_token) = jwt::JwtUtils::refresh_token_from(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let response = TokenResponse {
                access_token,
                token_type: TOKEN_TYPE.to_string(),
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Refresh token failed: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::expired_refresh_cookie();

            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_admin(request) {
        Some(admin) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdminInfoResponse { admin },
            "Admin information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
