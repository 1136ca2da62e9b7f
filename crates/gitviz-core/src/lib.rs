// Core webhook domain for Gitviz
//
// This crate holds everything the receiver needs that is independent of
// HTTP and storage:
// - EventKind: the fixed set of handled event types
// - typed payloads matching GitHub's webhook schema
// - signature: HMAC verification of the X-Hub-Signature header
// - translate: payload -> stored activity record

pub mod error;
pub mod event;
pub mod payload;
pub mod signature;
pub mod translate;

pub use error::{Result, WebhookError};
pub use event::EventKind;
pub use translate::{event_key, translate, NewEventRecord};
