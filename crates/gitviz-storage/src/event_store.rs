// EventStore trait
//
// Seam between the HTTP layer and persistence. The server binary plugs in
// the Postgres Database; router tests plug in InMemoryEventStore.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{EventRow, UpsertEvent, UpsertOutcome};

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert the event, or update the existing row when the event_key is
    /// already present. Must be atomic: two concurrent redeliveries of the
    /// same logical event end up with one row.
    async fn upsert_event(&self, input: UpsertEvent) -> Result<(EventRow, UpsertOutcome)>;

    async fn get_event_by_key(&self, event_key: &str) -> Result<Option<EventRow>>;

    /// Newest-first listing for the activity view
    async fn list_events(&self, limit: i64) -> Result<Vec<EventRow>>;
}
