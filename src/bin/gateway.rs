//! gateway：兄弟服务的聚合健康入口，不持有存储

use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use once_cell::sync::Lazy;
use tracing::warn;

use rust_lmsystem_next::clients::HealthClient;
use rust_lmsystem_next::config::AppConfig;
use rust_lmsystem_next::models::APP_START_TIME;
use rust_lmsystem_next::routes;
use rust_lmsystem_next::runtime::lifetime;
use rust_lmsystem_next::services::health::ServiceName;
use rust_lmsystem_next::utils::{json_error_handler, query_error_handler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    Lazy::force(&APP_START_TIME);

    // 启动前预处理 //

    setup_panic!();
    let config = AppConfig::load().expect("Failed to load configuration");

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting gateway...
        Project: {}
        Version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );

    let health_client = HealthClient::new(&config.services);

    // 预处理完成 //

    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(app_config.cors.max_age),
            )
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(health_client.clone()))
            .app_data(web::Data::new(ServiceName("gateway")))
            .configure(routes::configure_gateway_routes)
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .workers(config.server.workers);

    let bind_address = config.server_bind_address();
    warn!("Starting gateway at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
