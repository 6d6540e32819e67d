//! Configuration system for toolsync.
//!
//! Two layers:
//! 1. Global config (.toolsync.yml or ~/.config/toolsync/toolsync.yml)
//! 2. Command-line overrides applied on top for a single run

use std::path::{Path, PathBuf};

pub use self::global::{Config, CorrelationConfig, DiscoveryConfig, LocationsConfig, SyncConfig};
pub use self::overrides::{ConfigOverrides, ConfigOverridesBuilder};

mod global;
mod overrides;

/// Load configuration from the standard search paths and apply overrides.
pub fn load_config(explicit_path: Option<&PathBuf>, overrides: &ConfigOverrides) -> eyre::Result<Config> {
    let mut config = Config::load(explicit_path)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
