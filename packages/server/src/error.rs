use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use platform::blobstore::BlobError;
use platform::datastore::DatastoreError;

/// Application-level error type.
///
/// Hard failures surface as 500 responses carrying the raw error text in a
/// plain-text body, and are logged server-side.
#[derive(Debug)]
pub enum AppError {
    /// The request requires an authenticated principal.
    AuthRequired,
    Datastore(DatastoreError),
    Blob(BlobError),
    Render(askama::Error),
    /// The multipart body could not be read.
    Upload(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::AuthRequired => (StatusCode::UNAUTHORIZED, "Login required".to_string()),
            AppError::Datastore(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Blob(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Render(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::Upload(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("{message}");
        }
        (status, message).into_response()
    }
}

impl From<DatastoreError> for AppError {
    fn from(err: DatastoreError) -> Self {
        AppError::Datastore(err)
    }
}

impl From<BlobError> for AppError {
    fn from(err: BlobError) -> Self {
        AppError::Blob(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Render(err)
    }
}
