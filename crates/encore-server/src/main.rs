use axum::http::{header, HeaderValue};
use encore_db::AppState;
use sea_orm_migration::MigratorTrait;
use std::fs::OpenOptions;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

mod api;
mod config;
mod forms;
mod views;

use config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    init_tracing(&config);

    // Database connection
    let db_config = encore_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = encore_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    encore_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let state = Arc::new(AppState { db });

    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    tracing::info!(addr = %config.bind, debug = config.debug, "server started");

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("server error");
}

/// Console output filtered by `RUST_LOG`; outside debug mode, INFO and above
/// is also appended to the error log file.
fn init_tracing(config: &ServerConfig) {
    let file_layer = if config.debug {
        None
    } else {
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.error_log)
        {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::INFO),
            ),
            Err(e) => {
                eprintln!(
                    "cannot open error log {}: {e}",
                    config.error_log.display()
                );
                None
            }
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        .with(file_layer)
        .init();
}
