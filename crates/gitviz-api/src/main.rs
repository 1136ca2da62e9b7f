// Gitviz API server
// Decision: the webhook route reads the raw body so the HMAC covers the exact delivered bytes

mod common;
mod config;
mod events;
mod services;
mod webhook;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use gitviz_storage::{Database, EventStore};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{ActivityEvent, EventAccepted, ListResponse};
use config::AppConfig;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(webhook::receive_event, events::list_events),
    components(schemas(EventAccepted, ActivityEvent, ListResponse<ActivityEvent>)),
    tags(
        (name = "webhook", description = "GitHub webhook ingestion endpoint"),
        (name = "events", description = "Stored activity records")
    ),
    info(
        title = "Gitviz API",
        version = "0.1.0",
        description = "Webhook receiver that turns GitHub deliveries into repository activity records",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Build the full router (extracted for testing)
fn app(store: Arc<dyn EventStore>, hub_secret: String) -> Router {
    let webhook_state = webhook::AppState::new(store.clone(), hub_secret);
    let events_state = events::AppState::new(store);

    Router::new()
        .route("/health", get(health))
        .merge(webhook::routes(webhook_state))
        .merge(events::routes(events_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gitviz_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("gitviz-api starting...");

    let config = AppConfig::from_env()?;

    // Initialize database
    let db = Database::from_url(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database");

    let store: Arc<dyn EventStore> = Arc::new(db);
    let app = app(store, config.hub_secret);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
