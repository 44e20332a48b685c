use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::groups::requests::{CreateGroupRequest, GroupListQuery, UpdateGroupRequest};
use crate::services::GroupService;
use crate::utils::SafeGroupIdI64;

// 懒加载的全局 GroupService 实例
static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListQuery>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(query.into_inner(), &req).await
}

pub async fn create_group(
    req: HttpRequest,
    group_data: web::Json<CreateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(group_data.into_inner(), &req).await
}

pub async fn get_group(req: HttpRequest, group_id: SafeGroupIdI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(group_id.0, &req).await
}

pub async fn update_group(
    req: HttpRequest,
    group_id: SafeGroupIdI64,
    update_data: web::Json<UpdateGroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .update_group(group_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_group(req: HttpRequest, group_id: SafeGroupIdI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(group_id.0, &req).await
}

// 配置路由
pub fn configure_groups_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/groups")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_groups))
                    .route(web::post().to(create_group)),
            )
            .service(
                web::resource("/{group_id}")
                    .route(web::get().to(get_group))
                    .route(web::put().to(update_group))
                    .route(web::delete().to(delete_group)),
            ),
    );
}
