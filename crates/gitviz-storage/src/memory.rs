// In-memory EventStore
//
// Same upsert semantics as the Postgres implementation, backed by a map.
// Used by router tests so they run without a database.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::event_store::EventStore;
use crate::models::{EventRow, UpsertEvent, UpsertOutcome};

#[derive(Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, EventRow>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored logical events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn upsert_event(&self, input: UpsertEvent) -> Result<(EventRow, UpsertOutcome)> {
        let mut events = self.events.write().await;
        let now = Utc::now();

        match events.get_mut(&input.event_key) {
            Some(row) => {
                row.summary = input.summary;
                row.payload = input.payload;
                row.last_delivery_id = input.delivery_id;
                row.deliveries += 1;
                row.updated_at = now;
                Ok((row.clone(), UpsertOutcome::Updated))
            }
            None => {
                let row = EventRow {
                    id: Uuid::new_v4(),
                    event_key: input.event_key.clone(),
                    event_kind: input.event_kind,
                    repo: input.repo,
                    sender: input.sender,
                    action: input.action,
                    summary: input.summary,
                    payload: input.payload,
                    last_delivery_id: input.delivery_id,
                    deliveries: 1,
                    created_at: now,
                    updated_at: now,
                };
                events.insert(input.event_key, row.clone());
                Ok((row, UpsertOutcome::Inserted))
            }
        }
    }

    async fn get_event_by_key(&self, event_key: &str) -> Result<Option<EventRow>> {
        Ok(self.events.read().await.get(event_key).cloned())
    }

    async fn list_events(&self, limit: i64) -> Result<Vec<EventRow>> {
        let events = self.events.read().await;
        let mut rows: Vec<EventRow> = events.values().cloned().collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn push_input(key: &str) -> UpsertEvent {
        UpsertEvent {
            event_key: key.to_string(),
            event_kind: "push".to_string(),
            repo: Some("octocat/gitviz".to_string()),
            sender: Some("octocat".to_string()),
            action: None,
            summary: json!({ "commits": 0 }),
            payload: json!({ "ref": "refs/heads/main" }),
            delivery_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn redelivery_updates_instead_of_inserting() {
        let store = InMemoryEventStore::new();

        let (first, outcome) = store.upsert_event(push_input("k1")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(first.deliveries, 1);

        let redelivery = push_input("k1");
        let delivery_id = redelivery.delivery_id;
        let (second, outcome) = store.upsert_event(redelivery).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(second.id, first.id);
        assert_eq!(second.deliveries, 2);
        assert_eq!(second.last_delivery_id, delivery_id);

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_keys_insert_distinct_rows() {
        let store = InMemoryEventStore::new();
        store.upsert_event(push_input("k1")).await.unwrap();
        store.upsert_event(push_input("k2")).await.unwrap();
        assert_eq!(store.len().await, 2);

        let rows = store.list_events(10).await.unwrap();
        assert_eq!(rows.len(), 2);

        let row = store.get_event_by_key("k1").await.unwrap();
        assert!(row.is_some());
        assert!(store.get_event_by_key("missing").await.unwrap().is_none());
    }
}
