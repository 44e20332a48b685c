use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::services::StudentService;
use crate::utils::SafeStudentIdI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(student_data.into_inner(), &req)
        .await
}

pub async fn get_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(student_id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(student_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(student_id.0, &req).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
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
    async fn test_requests_without_token_return_401() {
        let ctx = TestContext::new().await;
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_students_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/students")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/v1/students")
            .insert_header(ctx.bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_student_limit_returns_400() {
        let ctx = TestContext::new().await;
        let plan = ctx
            .storage
            .create_plan(from_json(json!({
                "name": "Starter",
                "price": 199.0,
                "billing_interval": "monthly",
                "max_students": 1,
            })))
            .await
            .unwrap();
        ctx.storage
            .create_subscription_with_invoice(
                ctx.admin_id,
                from_json(json!({"plan_id": plan.id, "status": "active"})),
                199.0,
                "INV-0000TEST",
            )
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_students_routes),
        )
        .await;

        let create = |name: &str| {
            test::TestRequest::post()
                .uri("/api/v1/students")
                .insert_header(ctx.bearer())
                .set_json(json!({"full_name": name}))
                .to_request()
        };

        let resp = test::call_service(&app, create("Nadia Tazi")).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, create("Omar Chraibi")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 4004);
        assert_eq!(
            body["message"],
            "Cannot create new student: Would exceed subscription limit"
        );
        assert_eq!(ctx.storage.count_students().await.unwrap(), 1);
    }
}
