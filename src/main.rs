//! Caserne EPI Server
//!
//! REST API server for protective equipment inventory and inspections.

use anyhow::Context;
use axum::{
    http::Uri,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caserne_epi_server::{
    api,
    config::{AppConfig, LoggingConfig},
    error::AppError,
    repository::Repository,
    services::{cache::CacheHandle, redis::RedisService, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so the file writer flushes on shutdown
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Caserne EPI Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let cache = if config.cache.enabled {
        match RedisService::new(&config.cache.url).await {
            Ok(redis) => {
                tracing::info!("Connected to Redis");
                CacheHandle::new(Arc::new(redis), config.cache.ttl_seconds)
            }
            Err(e) => {
                tracing::warn!("Redis unavailable, collection cache disabled: {}", e);
                CacheHandle::disabled()
            }
        }
    } else {
        CacheHandle::disabled()
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(pool);
    let services = Services::new(repository, config.station.clone(), cache);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Install the global subscriber: stdout in the configured format, plus an
/// optional daily-rotated JSON file
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("caserne_epi_server={},tower_http=debug", logging.level).into()
    });

    let json = logging.format.eq_ignore_ascii_case("json");
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());
    let pretty_layer = (!json).then(tracing_subscriber::fmt::layer);

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "caserne-epi.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .init();

    guard
}

/// JSON body for unknown routes
async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route("/equipment/:id/assignment", put(api::equipment::assign_equipment))
        .route("/equipment/:id/assignment", delete(api::equipment::unassign_equipment))
        .route("/equipment/:id/assignments", get(api::equipment::list_assignments))
        .route("/equipment-types", get(api::equipment::list_equipment_types))
        .route("/equipment-types", post(api::equipment::create_equipment_type))
        // Personnel
        .route("/personnel", get(api::personnel::list_personnel))
        .route("/personnel", post(api::personnel::create_personnel))
        .route("/personnel/:id", get(api::personnel::get_personnel))
        .route("/personnel/:id", put(api::personnel::update_personnel))
        .route("/personnel/:id", delete(api::personnel::delete_personnel))
        .route("/personnel/:id/equipment", get(api::personnel::get_personnel_equipment))
        // Verifications
        .route("/verifications", get(api::verifications::list_verifications))
        .route("/verifications", post(api::verifications::schedule_verification))
        .route("/verifications/calendar", get(api::verifications::get_calendar))
        .route("/verifications/:id", get(api::verifications::get_verification))
        .route("/verifications/:id", put(api::verifications::update_verification))
        .route("/verifications/:id", delete(api::verifications::delete_verification))
        .route("/verifications/:id/cancel", post(api::verifications::cancel_verification))
        .route("/verifications/:id/complete", post(api::verifications::complete_verification))
        // Requests
        .route("/requests", get(api::requests::list_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/:id", delete(api::requests::delete_request))
        .route("/requests/:id/resolve", post(api::requests::resolve_request))
        // Alerts
        .route("/alerts", get(api::alerts::list_alerts))
        .route("/alerts", post(api::alerts::create_alert))
        .route("/alerts/:id", delete(api::alerts::delete_alert))
        .route("/alerts/:id/dismiss", post(api::alerts::dismiss_alert))
        // Reports
        .route("/reports", get(api::reports::get_reports))
        .route("/dashboard", get(api::reports::get_dashboard))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .fallback(route_not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
