use thiserror::Error;

use crate::datastore::DatastoreError;

/// Errors surfaced by a blob store backend.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The requested blob has no stored metadata.
    #[error("blob not found: {0}")]
    NotFound(String),
    /// The upload ticket is unknown or was already consumed.
    #[error("unknown or already-used upload ticket")]
    InvalidTicket,
    /// An I/O error occurred.
    #[error("blob store IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored metadata could not be encoded or decoded.
    #[error("blob metadata error: {0}")]
    Metadata(String),
    /// Writing the file-info record failed.
    #[error(transparent)]
    Datastore(#[from] DatastoreError),
}
