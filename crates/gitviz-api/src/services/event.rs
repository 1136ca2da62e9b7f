// Event service for business logic

use std::sync::Arc;

use gitviz_core::{translate, EventKind, WebhookError};
use gitviz_storage::{EventRow, EventStore, UpsertEvent, UpsertOutcome};
use uuid::Uuid;

use crate::common::{ActivityEvent, EventAccepted};

pub struct EventService {
    store: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Translate a verified delivery and upsert its logical event.
    ///
    /// Idempotent: redelivering the same payload updates the existing record
    /// and bumps the delivery counter instead of inserting a new row.
    pub async fn ingest(
        &self,
        kind: EventKind,
        delivery_id: Uuid,
        body: &[u8],
    ) -> Result<EventAccepted, WebhookError> {
        let record = translate(kind, body)?;
        // translate already parsed the body, so this cannot fail for a kind it accepted
        let payload: serde_json::Value =
            serde_json::from_slice(body).map_err(|e| WebhookError::payload(e.to_string()))?;

        let (row, outcome) = self
            .store
            .upsert_event(UpsertEvent {
                event_key: record.event_key,
                event_kind: record.kind.as_str().to_string(),
                repo: record.repo,
                sender: record.sender,
                action: record.action,
                summary: record.summary,
                payload,
                delivery_id,
            })
            .await
            .map_err(|e| WebhookError::store(e.to_string()))?;

        let status = match outcome {
            UpsertOutcome::Inserted => "created",
            UpsertOutcome::Updated => "updated",
        };

        Ok(EventAccepted {
            id: row.id,
            event_key: row.event_key,
            status: status.to_string(),
            deliveries: row.deliveries,
        })
    }

    pub async fn list(&self, limit: i64) -> anyhow::Result<Vec<ActivityEvent>> {
        let rows = self.store.list_events(limit).await?;
        Ok(rows.into_iter().map(Self::row_to_activity).collect())
    }

    fn row_to_activity(row: EventRow) -> ActivityEvent {
        ActivityEvent {
            id: row.id,
            event_key: row.event_key,
            event_kind: row.event_kind,
            repo: row.repo,
            sender: row.sender,
            action: row.action,
            summary: row.summary,
            deliveries: row.deliveries,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
