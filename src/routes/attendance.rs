use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::services::AttendanceService;
use crate::utils::SafeAttendanceIdI64;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    attendance_data: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(attendance_data.into_inner(), &req)
        .await
}

pub async fn get_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(attendance_id.0, &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
    update_data: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(attendance_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .delete_attendance(attendance_id.0, &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_attendance))
                    .route(web::post().to(record_attendance)),
            )
            .service(
                web::resource("/{attendance_id}")
                    .route(web::get().to(get_attendance))
                    .route(web::put().to(update_attendance))
                    .route(web::delete().to(delete_attendance)),
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
    async fn test_moving_record_onto_taken_date_returns_400() {
        let ctx = TestContext::new().await;
        let student = ctx
            .storage
            .create_student(from_json(json!({"full_name": "Hamza Berrada"})))
            .await
            .unwrap();
        let monday = ctx
            .storage
            .upsert_attendance(from_json(json!({
                "student_id": student.id,
                "date": "2024-10-07",
                "status": "present",
            })))
            .await
            .unwrap();
        let tuesday = ctx
            .storage
            .upsert_attendance(from_json(json!({
                "student_id": student.id,
                "date": "2024-10-08",
                "status": "absent",
            })))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_attendance_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/attendance/{}", tuesday.id))
            .insert_header(ctx.bearer())
            .set_json(json!({"date": "2024-10-07"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3025);
        assert_eq!(
            body["message"],
            format!(
                "Attendance already recorded for student {} on 2024-10-07",
                student.id
            )
        );

        // 原记录不变
        let kept = ctx
            .storage
            .get_attendance_by_id(monday.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.status.to_string(), "present");

        // 日期不变、只改状态仍然允许
        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/attendance/{}", tuesday.id))
            .insert_header(ctx.bearer())
            .set_json(json!({"date": "2024-10-08", "status": "late"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::put()
            .uri("/api/v1/attendance/9999")
            .insert_header(ctx.bearer())
            .set_json(json!({"date": "2024-10-09"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
