use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::exams::requests::{
    CreateExamRequest, ExamListQuery, SubmitExamResultsRequest, UpdateExamRequest,
};
use crate::services::ExamService;
use crate::utils::SafeExamIdI64;

// 懒加载的全局 ExamService 实例
static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamListQuery>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(query.into_inner(), &req).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(exam_data.into_inner(), &req).await
}

pub async fn get_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.get_exam(exam_id.0, &req).await
}

pub async fn update_exam(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    update_data: web::Json<UpdateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .update_exam(exam_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(exam_id.0, &req).await
}

pub async fn submit_results(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    results: web::Json<SubmitExamResultsRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .submit_results(exam_id.0, results.into_inner(), &req)
        .await
}

pub async fn list_results(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_results(exam_id.0, &req).await
}

// 配置路由
pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(web::post().to(create_exam)),
            )
            .service(
                web::resource("/{exam_id}/results")
                    .route(web::get().to(list_results))
                    .route(web::post().to(submit_results)),
            )
            .service(
                web::resource("/{exam_id}")
                    .route(web::get().to(get_exam))
                    .route(web::put().to(update_exam))
                    .route(web::delete().to(delete_exam)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestContext, from_json};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_results_for_unknown_student_return_400() {
        let ctx = TestContext::new().await;
        let group = ctx
            .storage
            .create_group(from_json(json!({"name": "1BAC-B"})))
            .await
            .unwrap();
        let course = ctx
            .storage
            .create_course(from_json(json!({"name": "Physique"})))
            .await
            .unwrap();
        let student = ctx
            .storage
            .create_student(from_json(json!({"full_name": "Youssef Alami", "group_id": group.id})))
            .await
            .unwrap();
        let exam = ctx
            .storage
            .create_exam(from_json(json!({
                "course_id": course.id,
                "group_id": group.id,
                "exam_date": "2024-12-16",
                "max_score": 20.0,
            })))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_exams_routes),
        )
        .await;

        let missing = student.id + 100;
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/exams/{}/results", exam.id))
            .insert_header(ctx.bearer())
            .set_json(json!({"results": [
                {"student_id": student.id, "score": 15.5},
                {"student_id": missing, "score": 12.0},
            ]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], format!("Student {missing} not found"));

        // 整批拒绝，已存在学生的成绩也未写入
        let stored = ctx.storage.list_exam_results(exam.id).await.unwrap();
        assert!(stored.is_empty());
    }
}
