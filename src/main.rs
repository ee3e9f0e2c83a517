//! enroll-analytics server entry point.
//!
//! Starts the Axum HTTP server after materializing the first dataset
//! snapshot and spawning the periodic refresh task.

use std::sync::Arc;
use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use enroll_analytics::api;
use enroll_analytics::app_state::AppState;
use enroll_analytics::auth::EventCodec;
use enroll_analytics::config::AnalyticsConfig;
use enroll_analytics::domain::SnapshotStore;
use enroll_analytics::persistence::{MySqlRecordSource, RecordSource, refresh};
use enroll_analytics::service::AnalyticsService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AnalyticsConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting enroll-analytics");

    // Connect to the platform's mirror database
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    let record_source = MySqlRecordSource::new(pool);

    // Materialize the initial snapshot; refusing to start without data
    // beats serving an empty dashboard.
    let initial = record_source.load_snapshot().await?;
    tracing::info!(events = initial.event_count(), "initial snapshot loaded");
    let store = Arc::new(SnapshotStore::new(initial));

    // Keep the snapshot fresh in the background
    let _refresh_task = refresh::spawn_refresh_loop(
        Arc::clone(&store),
        record_source,
        config.refresh_interval_secs,
    );

    // Build service layer
    let codec = EventCodec::new(&config.event_id_salt)
        .map_err(|e| anyhow::anyhow!("event-id codec: {e}"))?;
    let analytics = Arc::new(AnalyticsService::new(store, codec));

    // Build application state
    let app_state = AppState { analytics };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
