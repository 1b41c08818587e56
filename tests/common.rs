//! Shared test harness: a real gallery service on an ephemeral port.

#![allow(dead_code)]

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arsnap::config::ServerConfig;
use arsnap::server::{AppState, router, serve_with_shutdown};
use arsnap::store::{
    Clock, FilesystemStore, ManualClock, MemoryStore, SnapshotName, SnapshotStore, StoreError,
};
use async_trait::async_trait;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Smallest valid PNG: 1x1 transparent pixel.
pub const PIXEL_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

pub fn pixel_data_uri() -> String {
    format!("data:image/png;base64,{PIXEL_PNG_BASE64}")
}

/// Store whose every operation fails like an unwritable disk.
pub struct BrokenStore;

fn disk_error() -> StoreError {
    StoreError::io(
        "test",
        io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"),
    )
}

#[async_trait]
impl SnapshotStore for BrokenStore {
    async fn create(&self, _png: &[u8]) -> arsnap::store::Result<SnapshotName> {
        Err(disk_error())
    }

    async fn list(&self) -> arsnap::store::Result<Vec<SnapshotName>> {
        Err(disk_error())
    }

    async fn clear_all(&self) -> arsnap::store::Result<usize> {
        Err(disk_error())
    }

    async fn read(&self, _name: &SnapshotName) -> arsnap::store::Result<Option<Vec<u8>>> {
        Err(disk_error())
    }

    fn location(&self) -> String {
        "broken".to_string()
    }
}

#[derive(Default)]
pub struct TestHostBuilder {
    store: Option<Arc<dyn SnapshotStore>>,
    memory: bool,
    clock: Option<Arc<ManualClock>>,
    public_files: Vec<(PathBuf, Vec<u8>)>,
    body_limit_mb: Option<usize>,
}

impl TestHostBuilder {
    /// Serve from a caller-supplied store; `memory` and `clock` are ignored.
    pub fn store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Keep snapshots in memory instead of a temp directory.
    pub fn memory(mut self) -> Self {
        self.memory = true;
        self
    }

    pub fn clock(mut self, clock: Arc<ManualClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Add a file under the public directory.
    pub fn public_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.public_files.push((path.into(), content.into()));
        self
    }

    pub fn body_limit_mb(mut self, limit: usize) -> Self {
        self.body_limit_mb = Some(limit);
        self
    }

    pub async fn start(self) -> anyhow::Result<TestHost> {
        let root = TempDir::new()?;
        let snapshot_dir = root.path().join("snapshots");
        let public_dir = root.path().join("public");
        std::fs::create_dir_all(&public_dir)?;
        for (path, content) in &self.public_files {
            let full = public_dir.join(path);
            if let Some(parent) = full.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(full, content)?;
        }

        let clock: Option<Arc<dyn Clock>> = self.clock.map(|c| c as Arc<dyn Clock>);
        let store: Arc<dyn SnapshotStore> = match (self.store, self.memory, clock) {
            (Some(store), _, _) => store,
            (None, true, Some(clock)) => Arc::new(MemoryStore::with_clock(clock)),
            (None, true, None) => Arc::new(MemoryStore::new()),
            (None, false, Some(clock)) => {
                Arc::new(FilesystemStore::with_clock(&snapshot_dir, clock)?)
            },
            (None, false, None) => Arc::new(FilesystemStore::open(&snapshot_dir)?),
        };

        let mut server = ServerConfig::default();
        if let Some(limit) = self.body_limit_mb {
            server.body_limit_mb = limit;
        }
        let app = router(AppState::new(store, Some(public_dir)), &server);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = serve_with_shutdown(listener, app, async {
                let _ = shutdown_rx.await;
            })
            .await;
        });

        Ok(TestHost {
            base_url,
            client: reqwest::Client::new(),
            root,
            snapshot_dir,
            shutdown: Some(shutdown_tx),
        })
    }
}

/// Running service bound to 127.0.0.1 on a random port. Stops on drop.
pub struct TestHost {
    base_url: String,
    client: reqwest::Client,
    root: TempDir,
    snapshot_dir: PathBuf,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestHost {
    pub fn builder() -> TestHostBuilder {
        TestHostBuilder::default()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.delete(self.url(path)).send().await
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> reqwest::Result<reqwest::Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    pub async fn post_raw(
        &self,
        path: &str,
        content_type: &str,
        body: impl Into<reqwest::Body>,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url(path))
            .header("content-type", content_type)
            .body(body)
            .send()
            .await
    }

    /// Upload a data URI and return the public path of the new snapshot.
    pub async fn upload(&self, data_uri: &str) -> anyhow::Result<String> {
        let resp = self
            .post_json("/api/upload", &serde_json::json!({ "image": data_uri }))
            .await?;
        anyhow::ensure!(resp.status() == 200, "upload failed: {}", resp.status());
        let body: serde_json::Value = resp.json().await?;
        Ok(body["file"].as_str().unwrap_or_default().to_string())
    }

    pub async fn gallery(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.get("/api/gallery").await?.json().await?)
    }
}

impl Drop for TestHost {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
