//! Filesystem-backed snapshot store.
//!
//! One flat directory of PNG files. A new snapshot is written to a hidden
//! temporary file in the same directory and renamed into place, so a failed
//! or interrupted write never leaves a truncated `.png` that `list` would see.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::naming::{SnapshotName, sort_newest_first};
use super::{Result, SnapshotStore, StoreError};
use crate::security::validate_path_within_base;

/// Prefix of in-flight upload files. They never end in `.png`.
const TEMP_PREFIX: &str = ".upload-";
const TEMP_SUFFIX: &str = ".tmp";

/// Snapshot store over a single directory.
///
/// `FilesystemStore` is `Clone` and can be shared across threads. It keeps no
/// state besides the directory path, so every call observes changes made
/// out of band.
#[derive(Clone)]
pub struct FilesystemStore {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FilesystemStore {
    /// Opens the store, creating the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::with_clock(dir, Arc::new(SystemClock))
    }

    /// Opens the store with a custom clock for snapshot names.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_clock<P: AsRef<Path>>(dir: P, clock: Arc<dyn Clock>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| {
                StoreError::io(
                    format!("creating snapshot directory {}", dir.display()),
                    e,
                )
            })?;
            info!(dir = %dir.display(), "Created snapshots folder");
        }

        Ok(Self { dir, clock })
    }

    /// Directory holding the snapshots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create_sync(&self, png: &[u8]) -> Result<SnapshotName> {
        let name = SnapshotName::from_millis(self.clock.now_millis());
        let target = self.dir.join(name.as_str());
        let context = || format!("writing snapshot {name}");

        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)
            .map_err(|e| StoreError::io(context(), e))?;

        tmp.write_all(png)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(context(), e))?;

        // Same-millisecond names replace the earlier file.
        tmp.persist(&target)
            .map_err(|e| StoreError::io(context(), e.error))?;

        debug!(file = %name, bytes = png.len(), "Snapshot written");
        Ok(name)
    }

    fn list_sync(&self) -> Result<Vec<SnapshotName>> {
        let context = || format!("reading snapshot directory {}", self.dir.display());
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(context(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(context(), e))?;

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str().and_then(SnapshotName::parse) {
                names.push(name);
            }
        }

        sort_newest_first(&mut names);
        Ok(names)
    }

    fn clear_all_sync(&self) -> Result<usize> {
        let mut removed = 0;
        for name in self.list_sync()? {
            match fs::remove_file(self.dir.join(name.as_str())) {
                Ok(()) => removed += 1,
                // Already removed by a concurrent caller
                Err(e) if e.kind() == io::ErrorKind::NotFound => {},
                Err(e) => return Err(StoreError::io(format!("deleting snapshot {name}"), e)),
            }
        }
        Ok(removed)
    }

    fn read_sync(&self, name: &SnapshotName) -> Result<Option<Vec<u8>>> {
        let path = match validate_path_within_base(&self.dir, Path::new(name.as_str())) {
            Ok(path) => path,
            Err(e) => {
                warn!(file = %name, error = %e, "Snapshot path escapes snapshot directory");
                return Ok(None);
            },
        };

        // Directories named like snapshots are not gallery members
        match fs::metadata(&path) {
            Ok(meta) if !meta.is_file() => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            _ => {},
        }

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(format!("reading snapshot {name}"), e)),
        }
    }
}

#[async_trait]
impl SnapshotStore for FilesystemStore {
    async fn create(&self, png: &[u8]) -> Result<SnapshotName> {
        let store = self.clone();
        let png = png.to_vec();
        tokio::task::spawn_blocking(move || store.create_sync(&png)).await?
    }

    async fn list(&self) -> Result<Vec<SnapshotName>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.list_sync()).await?
    }

    async fn clear_all(&self) -> Result<usize> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.clear_all_sync()).await?
    }

    async fn read(&self, name: &SnapshotName) -> Result<Option<Vec<u8>>> {
        let store = self.clone();
        let name = name.clone();
        tokio::task::spawn_blocking(move || store.read_sync(&name)).await?
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}
