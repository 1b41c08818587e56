//! Snapshot file naming.
//!
//! A snapshot's file name is both its primary key and its recency sort key:
//! `snap_<unix-millis>.png`. Millisecond timestamps stay at 13 digits until
//! the year 2286, so lexical order equals chronological order.

use std::fmt;

use serde::Serialize;

use crate::constants::{SNAPSHOTS_PREFIX, SNAPSHOT_EXTENSION, SNAPSHOT_FILE_PREFIX};

/// Validated name of a file in the snapshot directory.
///
/// Any single path component ending in `.png` is accepted, so files dropped
/// into the directory out of band are gallery members too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SnapshotName(String);

impl SnapshotName {
    /// Name for a snapshot created at `millis` since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!(
            "{SNAPSHOT_FILE_PREFIX}{millis}{SNAPSHOT_EXTENSION}"
        ))
    }

    /// Parses a directory entry or request segment.
    ///
    /// Returns `None` for names that are not gallery members: wrong
    /// extension, hidden files, or anything containing a path separator.
    pub fn parse(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(SNAPSHOT_EXTENSION)?;
        if stem.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\', '\0'])
        {
            return None;
        }
        Some(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL path, e.g. `/snapshots/snap_1700000000000.png`.
    pub fn public_path(&self) -> String {
        format!("{SNAPSHOTS_PREFIX}{}", self.0)
    }

    /// Creation time embedded in a conventionally named snapshot.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0
            .strip_prefix(SNAPSHOT_FILE_PREFIX)?
            .strip_suffix(SNAPSHOT_EXTENSION)?
            .parse()
            .ok()
    }
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sorts names newest first (descending lexical order).
pub fn sort_newest_first(names: &mut [SnapshotName]) {
    names.sort_unstable_by(|a, b| b.cmp(a));
}
