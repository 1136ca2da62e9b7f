// Postgres storage layer with sqlx
//
// This crate provides the EventStore trait plus two implementations:
// - Database: Postgres-backed, used by the server binary
// - InMemoryEventStore: map-backed, used by router tests

pub mod event_store;
pub mod memory;
pub mod models;
pub mod repositories;

pub use event_store::EventStore;
pub use memory::InMemoryEventStore;
pub use models::*;
pub use repositories::Database;
