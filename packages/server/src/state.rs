use std::sync::Arc;

use platform::blobstore::BlobStore;
use platform::datastore::StructuredStore;
use platform::identity::IdentityProvider;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<dyn StructuredStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: AppConfig,
}
