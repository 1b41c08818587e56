//! Shared constants for the service and the client.

/// Default HTTP port (overridden by `$PORT` and `--port`).
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable that overrides the configured port.
pub const PORT_ENV: &str = "PORT";

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default directory (relative to the working directory) holding snapshots.
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";

/// Default maximum request body size in MiB.
pub const DEFAULT_BODY_LIMIT_MB: usize = 50;

/// Body limits above this trigger a configuration warning.
pub const LARGE_BODY_LIMIT_MB: usize = 512;

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "arsnap.toml";

// =============================================================================
// HTTP Routes
// =============================================================================

/// Upload endpoint.
pub const UPLOAD_PATH: &str = "/api/upload";

/// Gallery listing and clearing endpoint.
pub const GALLERY_PATH: &str = "/api/gallery";

/// Public prefix under which snapshot files are served.
pub const SNAPSHOTS_PREFIX: &str = "/snapshots/";

/// Health check endpoint.
pub const HEALTH_PATH: &str = "/health";

// =============================================================================
// Snapshot Format
// =============================================================================

/// Declaration every upload payload must start with.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// File name prefix of service-created snapshots.
pub const SNAPSHOT_FILE_PREFIX: &str = "snap_";

/// Extension that makes a file a gallery member.
pub const SNAPSHOT_EXTENSION: &str = ".png";

/// Content type of `.glb` model binaries.
pub const GLB_CONTENT_TYPE: &str = "model/gltf-binary";

/// Key under which the client persists the last selected model.
pub const SELECTED_MODEL_KEY: &str = "selectedModel";
