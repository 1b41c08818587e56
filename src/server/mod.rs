//! HTTP service for the snapshot gallery.
//!
//! Routes:
//! - `POST /api/upload` - store a PNG data URI as a new snapshot
//! - `GET /api/gallery` - public paths of all snapshots, newest first
//! - `DELETE /api/gallery` - delete every snapshot
//! - `GET /snapshots/{name}` - raw PNG bytes
//! - `GET /health` - liveness probe
//! - anything else - static files from the public directory
//!
//! The service keeps no state between requests beyond the store handle.

pub mod audit;
mod error;
pub mod handlers;
pub mod request_id;
pub mod static_files;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub use error::{AppError, ErrorBody};
pub use static_files::guess_content_type;

use crate::config::{Config, ServerConfig, StorageBackend, StorageConfig};
use crate::constants::{GALLERY_PATH, HEALTH_PATH, UPLOAD_PATH};
use crate::store::{FilesystemStore, MemoryStore, SnapshotStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SnapshotStore>,
    /// Page shell directory; `None` serves the API only.
    pub public_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(store: Arc<dyn SnapshotStore>, public_dir: Option<PathBuf>) -> Self {
        Self { store, public_dir }
    }
}

/// Build the application router.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route(UPLOAD_PATH, post(handlers::upload))
        .route(
            GALLERY_PATH,
            get(handlers::gallery_list).delete(handlers::gallery_clear),
        )
        .route("/snapshots/{name}", get(handlers::snapshot_file))
        .route(HEALTH_PATH, get(handlers::health))
        .fallback(static_files::serve_static)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes()));

    if server.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.layer(middleware::from_fn(request_id::trace_ids))
        .with_state(state)
}

/// Open the snapshot store selected by the storage settings.
///
/// # Errors
///
/// Returns an error if the filesystem store's directory cannot be created.
pub fn open_store(storage: &StorageConfig) -> Result<Arc<dyn SnapshotStore>> {
    Ok(match storage.backend {
        StorageBackend::Filesystem => Arc::new(
            FilesystemStore::open(&storage.snapshot_dir).with_context(|| {
                format!(
                    "Failed to open snapshot directory: {}",
                    storage.snapshot_dir.display()
                )
            })?,
        ),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    })
}

/// Bind, serve until Ctrl-C, then shut down gracefully.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the address cannot be
/// bound, or the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let store = open_store(&config.storage)?;

    let public_dir = &config.server.public_dir;
    let public_dir = if public_dir.is_dir() {
        Some(public_dir.clone())
    } else {
        warn!(dir = %public_dir.display(), "Public directory missing; serving API only");
        None
    };

    let listener = TcpListener::bind(config.server.addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.addr()))?;

    info!("Server running on http://{}", listener.local_addr()?);
    if let Some(dir) = &public_dir {
        info!("Serving files from {}", dir.display());
    }
    info!("Snapshots stored in {}", store.location());

    let state = AppState::new(store, public_dir);
    serve_with_shutdown(listener, router(state, &config.server), shutdown_signal()).await
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_with_shutdown<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
