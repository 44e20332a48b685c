use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::events::requests::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::services::EventService;
use crate::utils::SafeEventIdI64;

// 懒加载的全局 EventService 实例
static EVENT_SERVICE: Lazy<EventService> = Lazy::new(EventService::new_lazy);

pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListQuery>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.list_events(query.into_inner(), &req).await
}

pub async fn fullcalendar(req: HttpRequest) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.fullcalendar(&req).await
}

pub async fn create_event(
    req: HttpRequest,
    event_data: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.create_event(event_data.into_inner(), &req).await
}

pub async fn get_event(req: HttpRequest, event_id: SafeEventIdI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.get_event(event_id.0, &req).await
}

pub async fn update_event(
    req: HttpRequest,
    event_id: SafeEventIdI64,
    update_data: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    EVENT_SERVICE
        .update_event(event_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_event(req: HttpRequest, event_id: SafeEventIdI64) -> ActixResult<HttpResponse> {
    EVENT_SERVICE.delete_event(event_id.0, &req).await
}

// 配置路由
pub fn configure_events_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_events))
                    .route(web::post().to(create_event)),
            )
            .route("/fullcalendar", web::get().to(fullcalendar))
            .service(
                web::resource("/{event_id}")
                    .route(web::get().to(get_event))
                    .route(web::put().to(update_event))
                    .route(web::delete().to(delete_event)),
            ),
    );
}
