use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subject_grades::requests::{
    BulkGradesRequest, GroupAveragesQuery, GroupSubjectQuery, StudentGradesQuery,
};
use crate::services::SubjectGradeService;

// 懒加载的全局 SubjectGradeService 实例
static SUBJECT_GRADE_SERVICE: Lazy<SubjectGradeService> =
    Lazy::new(SubjectGradeService::new_lazy);

pub async fn bulk_upsert(
    req: HttpRequest,
    payload: web::Json<BulkGradesRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_GRADE_SERVICE
        .bulk_upsert(payload.into_inner(), &req)
        .await
}

pub async fn list_by_group_subject(
    req: HttpRequest,
    query: web::Query<GroupSubjectQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_GRADE_SERVICE
        .list_by_group_subject(query.into_inner(), &req)
        .await
}

pub async fn list_by_student(
    req: HttpRequest,
    query: web::Query<StudentGradesQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_GRADE_SERVICE
        .list_by_student(query.into_inner(), &req)
        .await
}

pub async fn averages_by_group(
    req: HttpRequest,
    query: web::Query<GroupAveragesQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_GRADE_SERVICE
        .averages_by_group(query.into_inner(), &req)
        .await
}

pub async fn export_averages(
    req: HttpRequest,
    query: web::Query<GroupAveragesQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_GRADE_SERVICE
        .export_averages(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_subject_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subject-grades")
            .wrap(middlewares::RequireJWT)
            .route("/bulk", web::post().to(bulk_upsert))
            .route("/by-group-subject", web::get().to(list_by_group_subject))
            .route("/by-student", web::get().to(list_by_student))
            .route("/averages/by-group", web::get().to(averages_by_group))
            .route(
                "/averages/by-group/export",
                web::get().to(export_averages),
            ),
    );
}
