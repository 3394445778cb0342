use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Backend error: {0}")]
    BackendError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PartialEq for SessionStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::BackendError(_), Self::BackendError(_))
                | (Self::SerializationError(_), Self::SerializationError(_))
        )
    }
}

/// Session-scoped key/value storage.
///
/// Values are addressed by the session identifier carried by the web context and
/// a key within that session. Reading from a session that does not exist yields
/// `None`; writing to one creates it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<Value>, SessionStoreError>;

    async fn set(&self, session_id: &str, key: &str, value: Value)
    -> Result<(), SessionStoreError>;

    async fn remove(&self, session_id: &str, key: &str) -> Result<(), SessionStoreError>;

    /// Drop the whole session. Returns `false` when there was nothing to destroy.
    async fn destroy_session(&self, session_id: &str) -> Result<bool, SessionStoreError>;
}
