use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use platform::blobstore::filesystem::FilesystemBlobStore;
use platform::datastore::StructuredStore;
use platform::datastore::memory::MemoryDatastore;
use platform::identity::CookieIdentity;
use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::load().context("Failed to load config")?;

    let datastore: Arc<dyn StructuredStore> = Arc::new(MemoryDatastore::new());
    let blobs = FilesystemBlobStore::new(
        PathBuf::from(&config.storage.blob_root),
        datastore.clone(),
    )
    .await
    .context("Failed to initialize blob storage")?;
    let identity = CookieIdentity::new(config.identity.cookie_name.clone());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        datastore,
        blobs: Arc::new(blobs),
        identity: Arc::new(identity),
        config,
    };
    let app = server::build_router(state);

    info!("Guestbook running at http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
