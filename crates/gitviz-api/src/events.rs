// Stored activity read API

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use gitviz_storage::EventStore;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::common::{ActivityEvent, ListResponse};
use crate::services::EventService;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 1000;

/// App state for the events routes
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            event_service: Arc::new(EventService::new(store)),
        }
    }
}

/// Create event listing routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", get(list_events))
        .with_state(state)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListEventsParams {
    /// Maximum number of records to return (default 100, max 1000)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// GET /v1/events - List stored activity records, newest first
#[utoipa::path(
    get,
    path = "/v1/events",
    params(ListEventsParams),
    responses(
        (status = 200, description = "Stored activity records", body = ListResponse<ActivityEvent>),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<ListEventsParams>,
) -> Result<Json<ListResponse<ActivityEvent>>, StatusCode> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let events = state.event_service.list(limit).await.map_err(|e| {
        tracing::error!("Failed to list events: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ListResponse::new(events)))
}
