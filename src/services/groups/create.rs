use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GroupService;
use crate::models::groups::requests::CreateGroupRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_group(
    service: &GroupService,
    group_data: CreateGroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if group_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Group name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_group(group_data).await {
        Ok(group) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(group, "Group created successfully"))),
        Err(e) => {
            error!("Group creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Group creation failed: {e}"),
                )),
            )
        }
    }
}
