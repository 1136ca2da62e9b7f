// Common DTOs for public API
//
// These types are shared across multiple API endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Outcome of accepting a webhook delivery.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventAccepted {
    /// Stored record ID.
    pub id: Uuid,
    /// Content-derived identity of the logical event.
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
    pub event_key: String,
    /// "created" on first delivery, "updated" on redelivery.
    #[schema(example = "created")]
    pub status: String,
    /// Total deliveries seen for this logical event.
    pub deliveries: i32,
}

/// One stored activity record, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub event_key: String,
    /// Wire name of the event type (e.g. "push").
    #[schema(example = "push")]
    pub event_kind: String,
    /// Repository full name, when the payload carried one.
    #[schema(example = "octocat/gitviz")]
    pub repo: Option<String>,
    /// Login of the account that triggered the event.
    pub sender: Option<String>,
    /// Sub-action for kinds that have one.
    #[schema(example = "opened")]
    pub action: Option<String>,
    /// Per-kind summary of the activity.
    #[schema(example = json!({ "ref": "refs/heads/main", "commits": 2 }))]
    pub summary: serde_json::Value,
    pub deliveries: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
