//! Run the gallery service in the foreground.
//!
//! Settings resolve in order: defaults, `arsnap.toml`, `$PORT`, CLI flags.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use arsnap::config::{Config, StorageBackend};

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub host: Option<IpAddr>,
    pub public_dir: Option<PathBuf>,
    pub snapshot_dir: Option<PathBuf>,
    pub backend: Option<StorageBackend>,
}

pub async fn execute(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;
    apply_overrides(&mut config, overrides);

    let validation = config.validate().context("Invalid configuration")?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    arsnap::server::serve(&config).await
}

fn apply_overrides(config: &mut Config, overrides: Overrides) {
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(dir) = overrides.public_dir {
        config.server.public_dir = dir;
    }
    if let Some(dir) = overrides.snapshot_dir {
        config.storage.snapshot_dir = dir;
    }
    if let Some(backend) = overrides.backend {
        config.storage.backend = backend;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_config() {
        let mut config = Config::default();
        config.apply_port_override(Some("8080")).unwrap();

        apply_overrides(
            &mut config,
            Overrides {
                port: Some(9000),
                backend: Some(StorageBackend::Memory),
                ..Overrides::default()
            },
        );

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.snapshot_dir, PathBuf::from("snapshots"));
    }
}
