//! Audit logging for gallery changes and blocked requests.
//!
//! Events are emitted on the `audit` tracing target with structured fields
//! so they can be filtered separately (`RUST_LOG=audit=info`).

use tracing::{info, warn};

/// Events worth keeping an audit trail of.
#[derive(Debug, Clone)]
pub enum AuditEvent {
    /// A snapshot was stored.
    SnapshotCreated { file: String, bytes: usize },
    /// Every snapshot was deleted.
    GalleryCleared { removed: usize },
    /// Path traversal attack blocked
    PathTraversalBlocked { path: String, reason: String },
}

/// Log an audit event with structured fields.
pub fn log_audit_event(event: AuditEvent) {
    match event {
        AuditEvent::SnapshotCreated { file, bytes } => {
            info!(
                target: "audit",
                event_type = "snapshot_created",
                %file,
                bytes,
                "Snapshot saved"
            );
        },
        AuditEvent::GalleryCleared { removed } => {
            info!(
                target: "audit",
                event_type = "gallery_cleared",
                removed,
                "Gallery cleared"
            );
        },
        AuditEvent::PathTraversalBlocked { path, reason } => {
            warn!(
                target: "audit",
                event_type = "path_traversal_blocked",
                %path,
                %reason,
                "Path traversal attempt blocked"
            );
        },
    }
}
