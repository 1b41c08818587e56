//! Snapshot persistence.
//!
//! The gallery has no index of its own: every call re-reads the backing
//! state, so the directory (or map) IS the database. Backends implement
//! [`SnapshotStore`]:
//!
//! - [`FilesystemStore`] - one flat directory of PNG files (production)
//! - [`MemoryStore`] - `DashMap`-backed, for tests and embedding
//!
//! Names come from an injectable [`Clock`]. Two creations in the same
//! millisecond produce the same name and the second overwrites the first.

mod clock;
mod filesystem;
mod memory;
mod naming;

use async_trait::async_trait;

pub use clock::{Clock, ManualClock, SystemClock};
pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;
pub use naming::{SnapshotName, sort_newest_first};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage failures. All of them map to opaque server errors over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error with context.
    #[error("IO error in {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Backend trait for snapshot storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Implementations add no locking of their own; concurrent callers get
/// whatever ordering the backing storage provides.
#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
    /// Stores a new snapshot named after the current clock tick.
    ///
    /// Either the whole snapshot becomes visible to [`list`](Self::list) or
    /// nothing does.
    async fn create(&self, png: &[u8]) -> Result<SnapshotName>;

    /// Lists every snapshot, newest first.
    async fn list(&self) -> Result<Vec<SnapshotName>>;

    /// Deletes every snapshot and returns how many were removed.
    ///
    /// Stops at the first failure. Deletions already done are not rolled back.
    async fn clear_all(&self) -> Result<usize>;

    /// Reads a snapshot's bytes.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` - Snapshot found
    /// * `Ok(None)` - Snapshot not found
    async fn read(&self, name: &SnapshotName) -> Result<Option<Vec<u8>>>;

    /// Human-readable location of the backing storage, for logs and health output.
    fn location(&self) -> String;
}
