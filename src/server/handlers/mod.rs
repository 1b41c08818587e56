//! HTTP API handlers organized by concern.

pub mod health;
pub mod snapshots;

// Re-export all handlers for use in routing
pub(crate) use health::health;
pub(crate) use snapshots::{gallery_clear, gallery_list, snapshot_file, upload};

pub use health::HealthResponse;
pub use snapshots::{OkResponse, UploadRequest, UploadResponse};
