use askama::Template;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::response::{Html, Response};
use platform::blobstore::{BlobKey, FILE_INFO_KIND, UploadField};
use platform::datastore::{self, FilterOp};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::identity::RequirePrincipal;
use crate::state::AppState;
use crate::templates::{FileEntry, UploadPage};
use crate::utils::bucket::{list_bounds, user_dir};

use super::redirect_found;

pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024) // 32 MB
}

/// Render the upload form and the caller's previously uploaded files.
#[instrument(skip(state, principal))]
pub async fn upload_page(
    RequirePrincipal(principal): RequirePrincipal,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let bucket = &state.config.storage.bucket;
    let upload_url = state
        .blobs
        .create_upload_url("/upload", &user_dir(bucket, &principal.id))
        .await?;

    let (lower, upper) = list_bounds(bucket, &principal.id);
    let query = datastore::Query::new(FILE_INFO_KIND)
        .keys_only()
        .filter("filename", FilterOp::GreaterThan, lower)
        .filter("filename", FilterOp::LessThan, upper)
        .order_asc("filename");
    let records = state.datastore.run(query).await?;

    let mut files = Vec::new();
    for record in records {
        let Some(name) = record.key().name() else {
            continue;
        };
        let key = BlobKey::from(name);
        match state.blobs.stat(&key).await {
            Ok(info) => files.push(FileEntry {
                filename: info.filename,
                key: key.to_string(),
            }),
            Err(err) => {
                // A bad entry stops the listing; the page still renders
                // with what was accumulated.
                tracing::error!("stat failed for {key}: {err}");
                break;
            }
        }
    }

    Ok(Html(UploadPage { upload_url, files }.render()?))
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    #[serde(default)]
    pub ticket: String,
}

/// Upload callback: hand the multipart body to the blob service, then
/// bounce back to the guestbook whether or not a file arrived.
#[instrument(skip(state, multipart))]
pub async fn complete_upload(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let fields = read_fields(multipart).await?;
    let blobs = state.blobs.parse_upload(&params.ticket, fields).await?;

    if blobs.get("file").is_none_or(|uploads| uploads.is_empty()) {
        tracing::error!("no file uploaded");
    }

    Ok(redirect_found("/"))
}

async fn read_fields(mut multipart: Multipart) -> Result<Vec<UploadField>, AppError> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Upload(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Upload(format!("Multipart error: {e}")))?
            .to_vec();
        fields.push(UploadField {
            name,
            filename,
            content_type,
            data,
        });
    }
    Ok(fields)
}
