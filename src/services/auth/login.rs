use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    admins::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

pub(super) const TOKEN_TYPE: &str = "bearer";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let admin = match storage.get_admin_by_username(&login_request.username).await {
        Ok(Some(admin)) if verify_password(&login_request.password, &admin.password_hash) => admin,
        Ok(_) => {
            tracing::info!("Failed login attempt for '{}'", login_request.username);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Incorrect username or password",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    let remember_me = login_request.remember_me;
    match jwt::JwtUtils::generate_token_pair(admin.id, &admin.username, remember_me) {
        Ok(token_pair) => {
            tracing::info!("Admin {} logged in successfully", admin.username);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                token_type: TOKEN_TYPE.to_string(),
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                username: admin.username,
            };
            let refresh_cookie = jwt::JwtUtils::refresh_cookie(&token_pair.refresh_token, remember_me);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
