use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::BlobError;

/// Datastore kind of the file-info records written for every stored upload.
///
/// Each record's key name is the blob key; its `filename` property carries
/// the synthetic object path that per-user range queries scan.
pub const FILE_INFO_KIND: &str = "__FileInfo__";

/// Opaque key of a stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey(String);

impl BlobKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BlobKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for BlobKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata of a stored blob.
#[derive(Debug, Clone)]
pub struct BlobInfo {
    pub key: BlobKey,
    /// Client-supplied filename.
    pub filename: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// One multipart form field from an upload callback.
#[derive(Debug, Clone)]
pub struct UploadField {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Blob storage with platform-issued upload URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Mint a single-use upload URL. Files posted to it are stored under
    /// `bucket_path` and the request is forwarded to `success_path` carrying
    /// the resulting blob references.
    async fn create_upload_url(
        &self,
        success_path: &str,
        bucket_path: &str,
    ) -> Result<String, BlobError>;

    /// Consume an upload ticket: store every file field under the ticket's
    /// bucket path and return the blob references keyed by form-field name.
    /// Fields without a client filename are skipped.
    async fn parse_upload(
        &self,
        ticket: &str,
        fields: Vec<UploadField>,
    ) -> Result<HashMap<String, Vec<BlobInfo>>, BlobError>;

    /// Stored-object metadata lookup.
    async fn stat(&self, key: &BlobKey) -> Result<BlobInfo, BlobError>;
}
