use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Bucket name uploads are stored under; object paths are
    /// `/{bucket}/{user id}/{object}`.
    pub bucket: String,
    /// Root directory of the local blob backend.
    pub blob_root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    /// Name of the login cookie holding `{id}:{email}`.
    pub cookie_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub identity: IdentityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("storage.bucket", "guestbook_bucket")?
            .set_default("storage.blob_root", "./data/blobs")?
            .set_default("identity.cookie_name", "guestbook_user")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GUESTBOOK__SERVER__PORT)
            .add_source(Environment::with_prefix("GUESTBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
