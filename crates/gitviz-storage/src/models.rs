// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One logical event as stored. Redeliveries update this row in place.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    /// Content-derived identity, unique per logical event
    pub event_key: String,
    pub event_kind: String,
    pub repo: Option<String>,
    pub sender: Option<String>,
    pub action: Option<String>,
    pub summary: sqlx::types::JsonValue,
    pub payload: sqlx::types::JsonValue,
    /// Delivery UUID of the most recent attempt
    pub last_delivery_id: Uuid,
    /// How many times this logical event has been delivered
    pub deliveries: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for the idempotent write
#[derive(Debug, Clone)]
pub struct UpsertEvent {
    pub event_key: String,
    pub event_kind: String,
    pub repo: Option<String>,
    pub sender: Option<String>,
    pub action: Option<String>,
    pub summary: serde_json::Value,
    pub payload: serde_json::Value,
    pub delivery_id: Uuid,
}

/// Whether the upsert created a new row or updated an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
