// Repository layer for database operations

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::event_store::EventStore;
use crate::models::{EventRow, UpsertEvent, UpsertOutcome};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

// Upsert result row: EventRow plus the insert/update marker from Postgres.
// xmax = 0 holds exactly when the row version was created by this statement,
// i.e. the INSERT arm ran rather than the DO UPDATE arm.
#[derive(Debug, FromRow)]
struct UpsertedRow {
    id: Uuid,
    event_key: String,
    event_kind: String,
    repo: Option<String>,
    sender: Option<String>,
    action: Option<String>,
    summary: sqlx::types::JsonValue,
    payload: sqlx::types::JsonValue,
    last_delivery_id: Uuid,
    deliveries: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    inserted: bool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the crate's migrations directory
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for Database {
    async fn upsert_event(&self, input: UpsertEvent) -> Result<(EventRow, UpsertOutcome)> {
        let row = sqlx::query_as::<_, UpsertedRow>(
            r#"
            INSERT INTO events (event_key, event_kind, repo, sender, action, summary, payload, last_delivery_id, deliveries)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1)
            ON CONFLICT (event_key) DO UPDATE
            SET
                summary = EXCLUDED.summary,
                payload = EXCLUDED.payload,
                last_delivery_id = EXCLUDED.last_delivery_id,
                deliveries = events.deliveries + 1,
                updated_at = NOW()
            RETURNING id, event_key, event_kind, repo, sender, action, summary, payload,
                      last_delivery_id, deliveries, created_at, updated_at,
                      (xmax = 0) AS inserted
            "#,
        )
        .bind(&input.event_key)
        .bind(&input.event_kind)
        .bind(&input.repo)
        .bind(&input.sender)
        .bind(&input.action)
        .bind(&input.summary)
        .bind(&input.payload)
        .bind(input.delivery_id)
        .fetch_one(&self.pool)
        .await?;

        let outcome = if row.inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        };

        Ok((
            EventRow {
                id: row.id,
                event_key: row.event_key,
                event_kind: row.event_kind,
                repo: row.repo,
                sender: row.sender,
                action: row.action,
                summary: row.summary,
                payload: row.payload,
                last_delivery_id: row.last_delivery_id,
                deliveries: row.deliveries,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            outcome,
        ))
    }

    async fn get_event_by_key(&self, event_key: &str) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_key, event_kind, repo, sender, action, summary, payload,
                   last_delivery_id, deliveries, created_at, updated_at
            FROM events
            WHERE event_key = $1
            "#,
        )
        .bind(event_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_events(&self, limit: i64) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_key, event_kind, repo, sender, action, summary, payload,
                   last_delivery_id, deliveries, created_at, updated_at
            FROM events
            ORDER BY updated_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
