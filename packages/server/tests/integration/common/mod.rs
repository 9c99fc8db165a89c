use std::net::SocketAddr;
use std::sync::Arc;

use platform::blobstore::filesystem::FilesystemBlobStore;
use platform::datastore::StructuredStore;
use platform::datastore::memory::MemoryDatastore;
use platform::identity::CookieIdentity;
use reqwest::Client;
use reqwest::redirect::Policy;

use server::config::{AppConfig, IdentityConfig, ServerConfig, StorageConfig};
use server::state::AppState;

pub mod routes {
    pub const GUESTBOOK: &str = "/";
    pub const SIGN: &str = "/sign";
    pub const UPLOAD_PAGE: &str = "/root";
}

/// Cookie header value for the dev-login identity.
pub fn identity_cookie(id: &str, email: &str) -> String {
    format!("guestbook_user={id}:{email}")
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub datastore: Arc<dyn StructuredStore>,
    blob_dir: tempfile::TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub location: Option<String>,
    /// Raw response body as text.
    pub text: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(MemoryDatastore::new())).await
    }

    pub async fn spawn_with(datastore: Arc<dyn StructuredStore>) -> Self {
        let blob_dir = tempfile::tempdir().expect("Failed to create blob tempdir");
        let blobs = FilesystemBlobStore::new(blob_dir.path().join("blobs"), datastore.clone())
            .await
            .expect("Failed to initialize blob storage");

        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            storage: StorageConfig {
                bucket: "bucket".to_string(),
                blob_root: blob_dir.path().join("blobs").display().to_string(),
            },
            identity: IdentityConfig {
                cookie_name: "guestbook_user".to_string(),
            },
        };

        let state = AppState {
            datastore: datastore.clone(),
            blobs: Arc::new(blobs),
            identity: Arc::new(CookieIdentity::new("guestbook_user")),
            config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // The 302s under test must stay observable, so never follow them.
        let client = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("Failed to build client");

        Self {
            addr,
            client,
            datastore,
            blob_dir,
        }
    }

    /// Root of the blob backend on disk.
    pub fn blob_root(&self) -> std::path::PathBuf {
        self.blob_dir.path().join("blobs")
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_as(&self, path: &str, cookie: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Cookie", cookie)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form_as(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: &str,
    ) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Cookie", cookie)
            .form(fields)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_file(
        &self,
        path: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
    ) -> TestResponse {
        let part = reqwest::multipart::Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str("text/plain")
            .expect("Failed to set MIME type");
        let form = reqwest::multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_without_file(&self, path: &str) -> TestResponse {
        let form = reqwest::multipart::Form::new().text("submit", "Submit");

        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = res.text().await.unwrap_or_default();
        Self {
            status,
            location,
            text,
        }
    }
}

/// The action URL of the upload form on a rendered upload page.
pub fn extract_upload_action(html: &str) -> String {
    let start = html.find("action=\"").expect("upload form action missing") + "action=\"".len();
    let end = html[start..]
        .find('"')
        .expect("unterminated action attribute")
        + start;
    html[start..end].to_string()
}
