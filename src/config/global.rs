//! Global configuration.
//!
//! Loaded from .toolsync.yml or ~/.config/toolsync/toolsync.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::correlation::{CorrelationMode, DescriptionMatch};
use crate::domain::LibraryLocation;
use crate::domain::tool::{
    ASSEMBLY_GAUGE_LENGTH_PARAMETER, COMMENT_PARAMETER, DEFAULT_GEOMETRY_PARAMETERS, PRODUCT_ID_PARAMETER,
};

/// Global configuration for toolsync.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Log level used when RUST_LOG is unset.
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Document tool library file.
    pub document: Option<PathBuf>,

    /// Root directories of the library locations.
    pub locations: LocationsConfig,

    /// Library discovery settings.
    pub discovery: DiscoveryConfig,

    /// Tool correlation settings.
    pub correlation: CorrelationConfig,

    /// Parameter merge settings.
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            document: None,
            locations: LocationsConfig::default(),
            discovery: DiscoveryConfig::default(),
            correlation: CorrelationConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .toolsync.yml in current directory
    /// 3. ~/.config/toolsync/toolsync.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project config
        let project_config = PathBuf::from(".toolsync.yml");
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from .toolsync.yml");
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load .toolsync.yml: {}", e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("toolsync").join("toolsync.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.correlation.comment_parameter.trim().is_empty() {
            eyre::bail!("correlation.comment-parameter must not be empty");
        }
        if self.correlation.product_id_parameter.trim().is_empty() {
            eyre::bail!("correlation.product-id-parameter must not be empty");
        }
        if self.correlation.mode == CorrelationMode::Geometry && self.correlation.geometry_parameters.is_empty() {
            eyre::bail!("correlation.geometry-parameters must not be empty in geometry mode");
        }
        glob::Pattern::new(&self.discovery.asset_pattern)
            .with_context(|| format!("discovery.asset-pattern is not a valid glob: {}", self.discovery.asset_pattern))?;
        Ok(())
    }
}

/// Root directories of the library locations.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationsConfig {
    pub cloud: Option<PathBuf>,
    pub local: Option<PathBuf>,
    pub external: Option<PathBuf>,
}

impl LocationsConfig {
    /// Configured root of a location, with `~` expanded.
    pub fn root(&self, location: LibraryLocation) -> Option<PathBuf> {
        let path = match location {
            LibraryLocation::Cloud => self.cloud.as_ref(),
            LibraryLocation::Local => self.local.as_ref(),
            LibraryLocation::External => self.external.as_ref(),
        }?;
        Some(super::expand_home(path))
    }
}

/// Library discovery settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Glob matched against file names to recognize library assets.
    #[serde(rename = "asset-pattern")]
    pub asset_pattern: String,

    /// Skip files and folders whose name starts with a dot.
    #[serde(rename = "skip-hidden")]
    pub skip_hidden: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            asset_pattern: "*.json".to_string(),
            skip_hidden: true,
        }
    }
}

/// Tool correlation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Field used to match tools.
    pub mode: CorrelationMode,

    /// Comparison used in description mode.
    #[serde(rename = "description-match")]
    pub description_match: DescriptionMatch,

    /// Parameter holding the tool comment.
    #[serde(rename = "comment-parameter")]
    pub comment_parameter: String,

    /// Parameter holding the vendor product id.
    #[serde(rename = "product-id-parameter")]
    pub product_id_parameter: String,

    /// Parameters hashed into the geometry signature.
    #[serde(rename = "geometry-parameters")]
    pub geometry_parameters: Vec<String>,

    /// Trim keys and never correlate blank ones. Off by default so keys are
    /// compared as stored.
    #[serde(rename = "normalize-keys")]
    pub normalize_keys: bool,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            mode: CorrelationMode::Description,
            description_match: DescriptionMatch::Exact,
            comment_parameter: COMMENT_PARAMETER.to_string(),
            product_id_parameter: PRODUCT_ID_PARAMETER.to_string(),
            geometry_parameters: DEFAULT_GEOMETRY_PARAMETERS.iter().map(|s| s.to_string()).collect(),
            normalize_keys: false,
        }
    }
}

/// Parameter merge settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Parameters never overwritten on the target.
    #[serde(rename = "reserved-parameters")]
    pub reserved_parameters: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            reserved_parameters: vec![ASSEMBLY_GAUGE_LENGTH_PARAMETER.to_string()],
        }
    }
}
