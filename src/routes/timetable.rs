use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::timetable::requests::{CreateTimetableRequest, UpdateTimetableRequest};
use crate::services::TimetableService;
use crate::utils::{SafeDayOfWeek, SafeGroupIdI64, SafeTimetableIdI64};

// 懒加载的全局 TimetableService 实例
static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);

pub async fn list_entries(req: HttpRequest) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_entries(&req).await
}

pub async fn list_by_group(
    req: HttpRequest,
    group_id: SafeGroupIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_by_group(group_id.0, &req).await
}

pub async fn group_pdf(req: HttpRequest, group_id: SafeGroupIdI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.group_pdf(group_id.0, &req).await
}

pub async fn list_by_day(req: HttpRequest, day: SafeDayOfWeek) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_by_day(day.0, &req).await
}

pub async fn create_entry(
    req: HttpRequest,
    entry_data: web::Json<CreateTimetableRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .create_entry(entry_data.into_inner(), &req)
        .await
}

pub async fn get_entry(
    req: HttpRequest,
    timetable_id: SafeTimetableIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.get_entry(timetable_id.0, &req).await
}

pub async fn update_entry(
    req: HttpRequest,
    timetable_id: SafeTimetableIdI64,
    update_data: web::Json<UpdateTimetableRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_entry(timetable_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_entry(
    req: HttpRequest,
    timetable_id: SafeTimetableIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_entry(timetable_id.0, &req).await
}

// 配置路由
pub fn configure_timetable_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timetable")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_entries))
                    .route(web::post().to(create_entry)),
            )
            .route("/group/{group_id}", web::get().to(list_by_group))
            .route("/group/{group_id}/pdf", web::get().to(group_pdf))
            .route("/day/{day}", web::get().to(list_by_day))
            .service(
                web::resource("/{timetable_id}")
                    .route(web::get().to(get_entry))
                    .route(web::put().to(update_entry))
                    .route(web::delete().to(delete_entry)),
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
    async fn test_overlapping_entry_returns_400() {
        let ctx = TestContext::new().await;
        let group = ctx
            .storage
            .create_group(from_json(json!({"name": "2BAC-A"})))
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .configure(ctx.app_data())
                .configure(configure_timetable_routes),
        )
        .await;

        let slot = |start: &str, end: &str| {
            json!({
                "group_id": group.id,
                "day_of_week": 1,
                "start_time": start,
                "end_time": end,
            })
        };

        let req = test::TestRequest::post()
            .uri("/api/v1/timetable")
            .insert_header(ctx.bearer())
            .set_json(slot("08:00:00", "10:00:00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/timetable")
            .insert_header(ctx.bearer())
            .set_json(slot("09:00:00", "11:00:00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 3020);
        assert_eq!(body["message"], "Time conflict with existing timetable entry");

        // 首尾相接不算冲突
        let req = test::TestRequest::post()
            .uri("/api/v1/timetable")
            .insert_header(ctx.bearer())
            .set_json(slot("10:00:00", "11:00:00"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
