use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::admins::requests::ChangePasswordRequest;
use crate::models::admins::responses::TokenResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password;

use super::AuthService;
use super::login::TOKEN_TYPE;

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(admin_id) = RequireJWT::extract_admin_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };
    let storage = service.get_storage(request);

    // 缓存中的管理员不带密码哈希，需重新读取
    let admin = match storage.get_admin_by_id(admin_id).await {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AdminNotFound,
                "Admin not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load admin: {e}"),
                )),
            );
        }
    };

    if !verify_password(&change_request.old_password, &admin.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::OldPasswordIncorrect,
            "Old password is incorrect",
        )));
    }

    if let Err(msg) = validate_password(&change_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }

    let new_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    if let Err(e) = storage.update_admin_password(admin.id, &new_hash).await {
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update password: {e}"),
            )),
        );
    }
    tracing::info!("Admin {} changed password", admin.username);

    match JwtUtils::generate_access_token(admin.id, &admin.username) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TokenResponse {
                access_token,
                token_type: TOKEN_TYPE.to_string(),
                expires_in: service.get_config().jwt.access_token_expiry * 60,
            },
            "Password changed successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to generate token: {e}"),
            )),
        ),
    }
}
