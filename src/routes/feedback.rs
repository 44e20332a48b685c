use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::{CreateFeedbackRequest, FeedbackListQuery};
use crate::services::FeedbackService;
use crate::utils::{SafeCourseIdI64, SafeFeedbackIdI64, SafeTeacherIdI64};

// 懒加载的全局 FeedbackService 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

pub async fn submit_feedback(
    req: HttpRequest,
    feedback_data: web::Json<CreateFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .submit_feedback(feedback_data.into_inner(), &req)
        .await
}

pub async fn list_feedback(
    req: HttpRequest,
    query: web::Query<FeedbackListQuery>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .list_feedback(query.into_inner(), &req)
        .await
}

pub async fn list_by_teacher(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.list_by_teacher(teacher_id.0, &req).await
}

pub async fn list_by_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.list_by_course(course_id.0, &req).await
}

pub async fn teacher_stats(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.teacher_stats(teacher_id.0, &req).await
}

pub async fn delete_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackIdI64,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.delete_feedback(feedback_id.0, &req).await
}

// 配置路由
pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedback")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_feedback))
                    .route(web::post().to(submit_feedback)),
            )
            .route("/teacher/{teacher_id}", web::get().to(list_by_teacher))
            .route(
                "/teacher/{teacher_id}/stats",
                web::get().to(teacher_stats),
            )
            .route("/course/{course_id}", web::get().to(list_by_course))
            .route("/{feedback_id}", web::delete().to(delete_feedback)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{TestContext, from_json};
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    fn feedback(student_id: i64, teacher_id: i64, course_id: i64) -> Value {
        json!({
            "student_id": student_id,
            "teacher_id": teacher_id,
            "course_id": course_id,
            "rating": 4,
            "satisfaction_score": 8,
            "teaching_quality": 4,
            "course_content": 5,
            "communication": 4,
            "helpfulness": 5,
        })
    }

    #[actix_web::test]
    async fn test_missing_references_return_404() {
        let ctx = TestContext::new().await;
        let student = ctx
            .storage
            .create_student(from_json(json!({"full_name": "Salma Idrissi"})))
            .await
            .unwrap();
        let teacher = ctx
            .storage
            .create_teacher(from_json(json!({"full_name": "Karim Benjelloun"})))
            .await
            .unwrap();
        let course = ctx
            .storage
            .create_course(from_json(json!({"name": "Anglais", "teacher_id": teacher.id})))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_feedback_routes),
        )
        .await;

        let cases = [
            (
                feedback(9999, teacher.id, course.id),
                3000,
                "Student with ID 9999 not found".to_string(),
            ),
            (
                feedback(student.id, 9999, course.id),
                3001,
                "Teacher with ID 9999 not found".to_string(),
            ),
            (
                feedback(student.id, teacher.id, 9999),
                3003,
                format!(
                    "Course with ID 9999 not found. Available courses: [{}]",
                    course.id
                ),
            ),
        ];
        for (payload, code, message) in cases {
            let req = test::TestRequest::post()
                .uri("/api/v1/feedback")
                .insert_header(ctx.bearer())
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], code);
            assert_eq!(body["message"], message);
        }

        let req = test::TestRequest::post()
            .uri("/api/v1/feedback")
            .insert_header(ctx.bearer())
            .set_json(feedback(student.id, teacher.id, course.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
