use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::datastore::{Entity, Key, StructuredStore};

use super::error::BlobError;
use super::traits::{BlobInfo, BlobKey, BlobStore, FILE_INFO_KIND, UploadField};

/// Sidecar metadata stored beside each object.
#[derive(Debug, Serialize, Deserialize)]
struct ObjectMeta {
    filename: String,
    size: u64,
    content_type: Option<String>,
    uploaded_at: DateTime<Utc>,
}

/// Filesystem-backed blob store.
///
/// Objects live under `root` at their synthetic path
/// (`/{bucket}/{user}/{object}`) with a JSON metadata sidecar beside each.
/// A file-info record for every stored object is written through the
/// injected structured store so upload listings can range-scan them.
pub struct FilesystemBlobStore {
    root: PathBuf,
    datastore: Arc<dyn StructuredStore>,
    /// Pending upload tickets: ticket -> bucket path. Single use.
    tickets: DashMap<String, String>,
}

impl FilesystemBlobStore {
    /// Create the store, ensuring `root` exists.
    pub async fn new(
        root: PathBuf,
        datastore: Arc<dyn StructuredStore>,
    ) -> Result<Self, BlobError> {
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            datastore,
            tickets: DashMap::new(),
        })
    }

    fn object_path(&self, key: &BlobKey) -> PathBuf {
        self.root.join(key.as_str().trim_start_matches('/'))
    }

    fn meta_path(&self, key: &BlobKey) -> PathBuf {
        let mut path = self.object_path(key).into_os_string();
        path.push(".meta.json");
        PathBuf::from(path)
    }

    fn mint_ticket() -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }

    async fn store_field(
        &self,
        bucket_path: &str,
        field: &UploadField,
        filename: &str,
    ) -> Result<BlobInfo, BlobError> {
        let object_path = format!("/{bucket_path}/{}", Uuid::new_v4());
        let key = BlobKey::from(object_path.as_str());

        let disk_path = self.object_path(&key);
        if let Some(parent) = disk_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&disk_path, &field.data).await?;

        let meta = ObjectMeta {
            filename: filename.to_string(),
            size: field.data.len() as u64,
            content_type: field.content_type.clone(),
            uploaded_at: Utc::now(),
        };
        let encoded =
            serde_json::to_vec(&meta).map_err(|e| BlobError::Metadata(e.to_string()))?;
        fs::write(self.meta_path(&key), encoded).await?;

        let record = Entity::new(Key::named(FILE_INFO_KIND, key.as_str()))
            .with("filename", object_path.as_str())
            .with("size", meta.size as i64)
            .with("uploaded", meta.uploaded_at);
        self.datastore.put(record).await?;

        tracing::debug!(%object_path, size = meta.size, "stored uploaded blob");

        Ok(BlobInfo {
            key,
            filename: meta.filename,
            size: meta.size,
            content_type: meta.content_type,
            uploaded_at: meta.uploaded_at,
        })
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn create_upload_url(
        &self,
        success_path: &str,
        bucket_path: &str,
    ) -> Result<String, BlobError> {
        let ticket = Self::mint_ticket();
        self.tickets
            .insert(ticket.clone(), bucket_path.trim_matches('/').to_string());
        Ok(format!("{success_path}?ticket={ticket}"))
    }

    async fn parse_upload(
        &self,
        ticket: &str,
        fields: Vec<UploadField>,
    ) -> Result<HashMap<String, Vec<BlobInfo>>, BlobError> {
        let (_, bucket_path) = self
            .tickets
            .remove(ticket)
            .ok_or(BlobError::InvalidTicket)?;

        let mut blobs: HashMap<String, Vec<BlobInfo>> = HashMap::new();
        for field in &fields {
            // An empty file input posts a field with no filename; the
            // platform stores nothing for it.
            let Some(filename) = field.filename.as_deref().filter(|name| !name.is_empty())
            else {
                continue;
            };
            let info = self.store_field(&bucket_path, field, filename).await?;
            blobs.entry(field.name.clone()).or_default().push(info);
        }
        Ok(blobs)
    }

    async fn stat(&self, key: &BlobKey) -> Result<BlobInfo, BlobError> {
        let raw = match fs::read(self.meta_path(key)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BlobError::NotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let meta: ObjectMeta =
            serde_json::from_slice(&raw).map_err(|e| BlobError::Metadata(e.to_string()))?;
        Ok(BlobInfo {
            key: key.clone(),
            filename: meta.filename,
            size: meta.size,
            content_type: meta.content_type,
            uploaded_at: meta.uploaded_at,
        })
    }
}
