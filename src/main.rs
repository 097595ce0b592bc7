use actix_cors::Cors;
use actix_web::{error, middleware, web, App, HttpResponse, HttpServer};
use meet_swipe::config::{LogFormat, LoggingSettings, Settings};
use meet_swipe::core::SwipeEngine;
use meet_swipe::models::ErrorResponse;
use meet_swipe::routes::{self, AppState};
use meet_swipe::services::{load_directory, SessionRegistry};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 400 with an `ErrorResponse` body for malformed payloads
fn payload_error<E>(kind: &str, err: E) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let body = ErrorResponse {
        error: format!("invalid_{}", kind),
        message: format!("Invalid {}: {}", kind, err),
        status_code: 400,
    };
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("JSON payload error on {}: {}", req.path(), err);
    payload_error("json", err)
}

fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    info!("Query error on {}: {}", req.path(), err);
    payload_error("query", err)
}

/// LOG_LEVEL / LOG_FORMAT override the configured values
fn init_tracing(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|value| LogFormat::parse(&value))
        .unwrap_or(logging.format);

    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Text => subscriber.init(),
    }
}

fn startup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| startup_error("Configuration error", e))?;

    init_tracing(&settings.logging);

    info!("Starting Meet swipe service...");

    let settings = settings.validated().map_err(|e| {
        error!("Invalid configuration: {}", e);
        startup_error("Invalid configuration", e)
    })?;

    info!("Configuration loaded successfully");

    let directory = load_directory(&settings.directory.profiles_path).map_err(|e| {
        error!("Failed to load profiles from {}: {}", settings.directory.profiles_path, e);
        startup_error("Profile directory error", e)
    })?;

    let engine = SwipeEngine::from_policy(settings.swipe.clone());

    info!("Swipe engine initialized with policy: {:?}", settings.swipe);

    let app_state = AppState {
        sessions: Arc::new(SessionRegistry::new(
            Arc::new(directory),
            engine,
            settings.vip.clone(),
        )),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
