use thiserror::Error;

/// Errors surfaced by a structured store backend.
#[derive(Debug, Error)]
pub enum DatastoreError {
    /// The operation requires a complete key.
    #[error("incomplete key: {0}")]
    IncompleteKey(String),
    /// Backend-specific failure.
    #[error("datastore backend error: {0}")]
    Backend(String),
}
