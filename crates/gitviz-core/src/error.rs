// Error types for webhook processing

use thiserror::Error;

/// Result type alias for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Errors that can occur while processing a webhook delivery
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header missing or did not match the request body
    #[error("signature verification failed")]
    Signature,

    /// Event type with no registered handler
    #[error("unsupported event type: {0}")]
    UnsupportedEvent(String),

    /// Body could not be parsed as the payload for its event type
    #[error("invalid payload: {0}")]
    Payload(String),

    /// Storage error
    #[error("store error: {0}")]
    Store(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl WebhookError {
    /// Create a payload error
    pub fn payload(msg: impl Into<String>) -> Self {
        WebhookError::Payload(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        WebhookError::Store(msg.into())
    }

    /// Create an unsupported-event error
    pub fn unsupported(event: impl Into<String>) -> Self {
        WebhookError::UnsupportedEvent(event.into())
    }
}
