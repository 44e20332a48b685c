use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use edumanage_server::config::{AppConfig, CorsConfig};
use edumanage_server::models::AppStartTime;
use edumanage_server::routes;
use edumanage_server::runtime::lifetime;
use edumanage_server::utils::{json_error_handler, query_error_handler};

/// 开发环境输出带文件行号的文本日志，其余环境输出 JSON
fn init_tracing(config: &AppConfig) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.app.log_level))
        .with_writer(writer)
        .with_level(true)
        .with_ansi(config.is_development());

    if config.is_development() {
        builder.with_file(true).with_line_number(true).init();
    } else {
        builder.json().init();
    }
    guard
}

// 允许列表含 `*` 时放开所有来源
fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().max_age(config.max_age);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        cors = cors.supports_credentials();
    }

    cors = if config.allowed_methods.is_empty() {
        cors.allow_any_method()
    } else {
        cors.allowed_methods(config.allowed_methods.iter().map(String::as_str))
    };

    if config.allowed_headers.is_empty() {
        cors.allow_any_header()
    } else {
        cors.allowed_headers(config.allowed_headers.iter().map(String::as_str))
    }
}

fn api(cfg: &mut web::ServiceConfig) {
    cfg.configure(routes::configure_auth_routes)
        .configure(routes::configure_students_routes)
        .configure(routes::configure_teachers_routes)
        .configure(routes::configure_groups_routes)
        .configure(routes::configure_courses_routes)
        .configure(routes::configure_exams_routes)
        .configure(routes::configure_attendance_routes)
        .configure(routes::configure_timetable_routes)
        .configure(routes::configure_payments_routes)
        .configure(routes::configure_reports_routes)
        .configure(routes::configure_documents_routes)
        .configure(routes::configure_events_routes)
        .configure(routes::configure_subjects_routes)
        .configure(routes::configure_subject_grades_routes)
        .configure(routes::configure_feedback_routes)
        .configure(routes::configure_settings_routes)
        .configure(routes::configure_subscriptions_routes)
        // 健康检查与生成文件放最后
        .configure(routes::configure_system_routes);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();
    let _log_guard = init_tracing(config);

    info!(
        "{} v{} ({}) starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = lifetime::startup::prepare_server_startup().await;
    let storage = startup.storage.clone();
    let cache = startup.cache.clone();

    debug!(
        "Startup finished in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );
    warn!("Running with {} workers", config.server.workers);

    let keep_alive = config.server.timeouts.keep_alive;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&config.cors))
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Keep-Alive", format!("timeout={keep_alive}, max=1000")))
                    .add(("Cache-Control", "no-store")),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(api)
    })
    .keep_alive(Duration::from_secs(keep_alive))
    .client_request_timeout(Duration::from_millis(config.server.timeouts.client_request))
    .client_disconnect_timeout(Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Listening on unix socket {}", socket_path);
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            let address = config.server_bind_address();
            warn!("Listening on http://{}", address);
            server.bind(address)?
        }
    };
    #[cfg(not(unix))]
    let server = {
        let address = config.server_bind_address();
        warn!("Listening on http://{}", address);
        server.bind(address)?
    };
    let server = server.run();

    tokio::select! {
        res = server => res?,
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Shutdown signal received, stopping server");
        }
    }
    Ok(())
}
