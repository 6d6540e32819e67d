//! Execution overrides.
//!
//! Runtime overrides taken from command-line flags for a single sync run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Config;
use crate::correlation::{CorrelationMode, DescriptionMatch};

/// Configuration overrides for a single run.
///
/// These take precedence over the loaded config file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigOverrides {
    /// Override the document library file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,

    /// Override the correlation mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CorrelationMode>,

    /// Override the description match strategy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_match: Option<DescriptionMatch>,

    /// Replace the reserved parameter list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved_parameters: Option<Vec<String>>,
}

impl ConfigOverrides {
    /// Create empty overrides (no overrides applied).
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any overrides are set.
    pub fn is_empty(&self) -> bool {
        self.document.is_none()
            && self.mode.is_none()
            && self.description_match.is_none()
            && self.reserved_parameters.is_none()
    }

    /// Apply the set overrides to a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(document) = &self.document {
            config.document = Some(document.clone());
        }
        if let Some(mode) = self.mode {
            config.correlation.mode = mode;
        }
        if let Some(strategy) = self.description_match {
            config.correlation.description_match = strategy;
        }
        if let Some(reserved) = &self.reserved_parameters {
            config.sync.reserved_parameters = reserved.clone();
        }
    }
}

/// Builder for ConfigOverrides.
#[derive(Debug, Default)]
pub struct ConfigOverridesBuilder {
    overrides: ConfigOverrides,
}

impl ConfigOverridesBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(mut self, path: impl Into<PathBuf>) -> Self {
        self.overrides.document = Some(path.into());
        self
    }

    pub fn mode(mut self, mode: CorrelationMode) -> Self {
        self.overrides.mode = Some(mode);
        self
    }

    pub fn description_match(mut self, strategy: DescriptionMatch) -> Self {
        self.overrides.description_match = Some(strategy);
        self
    }

    pub fn reserved_parameters(mut self, names: Vec<String>) -> Self {
        self.overrides.reserved_parameters = Some(names);
        self
    }

    /// Build the ConfigOverrides.
    pub fn build(self) -> ConfigOverrides {
        self.overrides
    }
}
