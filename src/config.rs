//! Configuration for the arsnap service.
//!
//! Settings come from an optional `arsnap.toml`, then `$PORT`, then CLI flags.
//! Every field has a default, so an empty or missing file is a valid config:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! public_dir = "."
//! body_limit_mb = 50
//! cors = true
//!
//! [storage]
//! backend = "filesystem"
//! snapshot_dir = "snapshots"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// arsnap.toml configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served as the page shell (HTML, scripts, `.glb` models).
    pub public_dir: PathBuf,
    /// Maximum request body size in MiB. Snapshots arrive base64 encoded.
    pub body_limit_mb: usize,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: constants::DEFAULT_PORT,
            public_dir: PathBuf::from("."),
            body_limit_mb: constants::DEFAULT_BODY_LIMIT_MB,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Body limit in bytes.
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}

/// Which [`SnapshotStore`](crate::store::SnapshotStore) backs the gallery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Filesystem,
    Memory,
}

/// Snapshot storage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub snapshot_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            snapshot_dir: PathBuf::from(constants::DEFAULT_SNAPSHOT_DIR),
        }
    }
}

impl Config {
    /// Load `arsnap.toml` from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Path::new(constants::CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Fields have invalid types or are unknown
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply `$PORT` if it is set.
    ///
    /// # Errors
    ///
    /// Returns an error if `$PORT` is set but is not a valid port number.
    pub fn apply_env(&mut self) -> Result<()> {
        let port = std::env::var(constants::PORT_ENV).ok();
        self.apply_port_override(port.as_deref())
    }

    /// Apply a port override given as text (empty means unset).
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid port number.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.server.port = value
                .parse()
                .with_context(|| format!("Invalid {}: '{value}'", constants::PORT_ENV))?;
        }
        Ok(())
    }

    /// Validate configuration.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Port 0
    /// - Body limit 0
    /// - Public or snapshot path exists but is not a directory
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let server = &self.server;
        if server.port == 0 {
            errors.push(
                "Server port cannot be 0. Use a valid port number (1-65535)".to_string(),
            );
        }

        if server.port < 1024 && server.port > 0 {
            warnings.push(format!(
                "Server port {} is a system/privileged port (< 1024)\n  \
                 Recommendation: Use ports >= 1024 (e.g., 5000, 8080) to avoid permission issues",
                server.port
            ));
        }

        if server.body_limit_mb == 0 {
            errors.push(
                "Server body_limit_mb cannot be 0. Snapshot uploads need room for a base64 PNG"
                    .to_string(),
            );
        }

        if server.body_limit_mb > constants::LARGE_BODY_LIMIT_MB {
            warnings.push(format!(
                "Server body_limit_mb {} is very high (> {})",
                server.body_limit_mb,
                constants::LARGE_BODY_LIMIT_MB
            ));
        }

        if server.public_dir.exists() && !server.public_dir.is_dir() {
            errors.push(format!(
                "Public path is not a directory: {}",
                server.public_dir.display()
            ));
        } else if !server.public_dir.exists() {
            warnings.push(format!(
                "Public directory does not exist: {}\n  Only the API will be served",
                server.public_dir.display()
            ));
        }

        if self.storage.backend == StorageBackend::Filesystem
            && self.storage.snapshot_dir.exists()
            && !self.storage.snapshot_dir.is_dir()
        {
            errors.push(format!(
                "Snapshot path is not a directory: {}",
                self.storage.snapshot_dir.display()
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
