//! In-memory snapshot store.
//!
//! Non-persistent, `DashMap`-backed. Used by tests and by the `memory`
//! storage backend setting; all snapshots are lost when the process exits.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use super::clock::{Clock, SystemClock};
use super::naming::{SnapshotName, sort_newest_first};
use super::{Result, SnapshotStore};

/// In-memory snapshot store.
///
/// Keeps no ordering of its own; `list` sorts on every call like the
/// filesystem backend does.
#[derive(Clone)]
pub struct MemoryStore {
    snapshots: Arc<DashMap<SnapshotName, Vec<u8>>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl MemoryStore {
    /// Creates a new empty store using the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshots: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Returns the number of snapshots in the store.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn create(&self, png: &[u8]) -> Result<SnapshotName> {
        let name = SnapshotName::from_millis(self.clock.now_millis());
        self.snapshots.insert(name.clone(), png.to_vec());
        Ok(name)
    }

    async fn list(&self) -> Result<Vec<SnapshotName>> {
        let mut names: Vec<_> = self.snapshots.iter().map(|e| e.key().clone()).collect();
        sort_newest_first(&mut names);
        Ok(names)
    }

    async fn clear_all(&self) -> Result<usize> {
        let names: Vec<_> = self.snapshots.iter().map(|e| e.key().clone()).collect();
        Ok(names
            .iter()
            .filter(|name| self.snapshots.remove(*name).is_some())
            .count())
    }

    async fn read(&self, name: &SnapshotName) -> Result<Option<Vec<u8>>> {
        Ok(self.snapshots.get(name).map(|e| e.value().clone()))
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
