use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest,
};
use crate::services::TeacherService;
use crate::utils::SafeTeacherIdI64;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    teacher_data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .create_teacher(teacher_data.into_inner(), &req)
        .await
}

pub async fn get_teacher(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(teacher_id.0, &req).await
}

pub async fn update_teacher(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    update_data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(teacher_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_teacher(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(teacher_id.0, &req).await
}

pub async fn get_teacher_stats(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher_stats(teacher_id.0, &req).await
}

pub async fn get_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_overview(&req).await
}

pub async fn update_teacher_stats(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.update_teacher_stats(teacher_id.0, &req).await
}

pub async fn update_all_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.update_all_stats(&req).await
}

// 配置路由
pub fn configure_teachers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            // 固定路径需在 /{teacher_id} 之前注册
            .route("/stats/overview", web::get().to(get_overview))
            .route("/update-all-stats", web::post().to(update_all_stats))
            .route("/{teacher_id}/stats", web::get().to(get_teacher_stats))
            .route(
                "/{teacher_id}/update-stats",
                web::post().to(update_teacher_stats),
            )
            .service(
                web::resource("/{teacher_id}")
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(delete_teacher)),
            ),
    );
}
