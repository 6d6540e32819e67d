//! Correlation keys: deciding that a target tool and a source tool are the same tool
//!
//! Three modes derive a key from a tool: its comment, its product id, or a
//! SHA-256 signature of its geometry. Comments may be compared exactly or by
//! substring, the two are separate strategies.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::CorrelationConfig;
use crate::domain::Tool;
use crate::error::{Result, ToolSyncError};

/// Which field identifies a tool across libraries
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationMode {
    #[default]
    Description,
    ProductId,
    Geometry,
}

impl CorrelationMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "description" | "comment" => Ok(Self::Description),
            "product-id" | "productid" => Ok(Self::ProductId),
            "geometry" => Ok(Self::Geometry),
            other => Err(ToolSyncError::InvalidArgument(format!("unknown correlation mode: {}", other))),
        }
    }
}

impl fmt::Display for CorrelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => f.write_str("description"),
            Self::ProductId => f.write_str("product-id"),
            Self::Geometry => f.write_str("geometry"),
        }
    }
}

/// How two description keys are compared
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptionMatch {
    /// Case-sensitive equality
    #[default]
    Exact,
    /// The source key contains the target key
    Contains,
}

impl DescriptionMatch {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "contains" => Ok(Self::Contains),
            other => Err(ToolSyncError::InvalidArgument(format!("unknown description match: {}", other))),
        }
    }

    pub fn matches(&self, target_key: &str, source_key: &str) -> bool {
        match self {
            Self::Exact => target_key == source_key,
            Self::Contains => source_key.contains(target_key),
        }
    }
}

/// Lowercase hex SHA-256 over the sorted `name=value` lines of the given
/// parameters. `None` when the tool carries none of them.
pub fn geometry_signature(tool: &Tool, parameters: &[String]) -> Option<String> {
    let mut lines: Vec<String> = parameters
        .iter()
        .filter_map(|name| tool.value(name).map(|v| format!("{}={}", name, v)))
        .collect();
    if lines.is_empty() {
        return None;
    }
    lines.sort();

    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    Some(hex::encode(hasher.finalize()))
}

/// Computes and compares correlation keys for one configured mode
#[derive(Debug, Clone)]
pub struct Correlator {
    mode: CorrelationMode,
    description_match: DescriptionMatch,
    comment_parameter: String,
    product_id_parameter: String,
    geometry_parameters: Vec<String>,
    normalize_keys: bool,
}

impl Correlator {
    pub fn from_config(config: &CorrelationConfig) -> Self {
        Self {
            mode: config.mode,
            description_match: config.description_match,
            comment_parameter: config.comment_parameter.clone(),
            product_id_parameter: config.product_id_parameter.clone(),
            geometry_parameters: config.geometry_parameters.clone(),
            normalize_keys: config.normalize_keys,
        }
    }

    pub fn mode(&self) -> CorrelationMode {
        self.mode
    }

    /// Correlation key of a tool, `None` when the keyed parameter is missing.
    ///
    /// Keys are returned as stored unless `normalize-keys` is set, in which
    /// case they are trimmed and blank keys yield `None`.
    pub fn key(&self, tool: &Tool) -> Option<String> {
        let raw = match self.mode {
            CorrelationMode::Description => tool.value(&self.comment_parameter).map(|v| v.to_string()),
            CorrelationMode::ProductId => tool.value(&self.product_id_parameter).map(|v| v.to_string()),
            CorrelationMode::Geometry => geometry_signature(tool, &self.geometry_parameters),
        }?;
        if !self.normalize_keys {
            return Some(raw);
        }
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn key_matches(&self, target_key: &str, source_key: &str) -> bool {
        match self.mode {
            CorrelationMode::Description => self.description_match.matches(target_key, source_key),
            CorrelationMode::ProductId | CorrelationMode::Geometry => target_key == source_key,
        }
    }
}

impl Default for Correlator {
    fn default() -> Self {
        Self::from_config(&CorrelationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tool::PRODUCT_ID_PARAMETER;

    fn correlator(mode: CorrelationMode, description_match: DescriptionMatch) -> Correlator {
        Correlator::from_config(&CorrelationConfig {
            mode,
            description_match,
            ..Default::default()
        })
    }

    fn normalizing() -> Correlator {
        Correlator::from_config(&CorrelationConfig {
            normalize_keys: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_description_key_is_raw_comment() {
        let c = Correlator::default();
        let tool = Tool::new("a").with_comment("T1 ");
        assert_eq!(c.key(&tool).as_deref(), Some("T1 "));
        assert!(!c.key_matches("T1 ", "T1"));
        assert_eq!(c.key(&Tool::new("b").with_comment("")).as_deref(), Some(""));
        assert_eq!(c.key(&Tool::new("c")), None);
    }

    #[test]
    fn test_normalized_key_is_trimmed_comment() {
        let c = normalizing();
        let tool = Tool::new("a").with_comment("  T1-6mm-Endmill ");
        assert_eq!(c.key(&tool).as_deref(), Some("T1-6mm-Endmill"));
    }

    #[test]
    fn test_normalized_blank_or_missing_key() {
        let c = normalizing();
        assert_eq!(c.key(&Tool::new("a")), None);
        assert_eq!(c.key(&Tool::new("b").with_comment("   ")), None);
    }

    #[test]
    fn test_exact_strategy() {
        assert!(DescriptionMatch::Exact.matches("T1", "T1"));
        assert!(!DescriptionMatch::Exact.matches("T1", "T1-6mm"));
        assert!(!DescriptionMatch::Exact.matches("t1", "T1"));
    }

    #[test]
    fn test_contains_strategy() {
        assert!(DescriptionMatch::Contains.matches("6mm", "T1-6mm-Endmill"));
        assert!(!DescriptionMatch::Contains.matches("T1-6mm-Endmill", "6mm"));
        assert!(!DescriptionMatch::Contains.matches("6MM", "T1-6mm-Endmill"));
    }

    #[test]
    fn test_product_id_mode() {
        let c = correlator(CorrelationMode::ProductId, DescriptionMatch::Contains);
        let tool = Tool::new("a")
            .with_comment("T1")
            .with_parameter(PRODUCT_ID_PARAMETER, "HAR-33106");
        assert_eq!(c.key(&tool).as_deref(), Some("HAR-33106"));
        // Substring strategy only applies to descriptions
        assert!(!c.key_matches("HAR-331", "HAR-33106"));
    }

    #[test]
    fn test_geometry_signature_ignores_order_and_other_params() {
        let a = Tool::new("a")
            .with_parameter("tool_diameter", 6.0)
            .with_parameter("tool_numberOfFlutes", 2i64)
            .with_comment("first");
        let b = Tool::new("b")
            .with_parameter("tool_numberOfFlutes", 2i64)
            .with_parameter("tool_diameter", 6.0)
            .with_comment("second");
        let c = correlator(CorrelationMode::Geometry, DescriptionMatch::Exact);
        let key_a = c.key(&a).unwrap();
        assert_eq!(key_a.len(), 64);
        assert_eq!(Some(key_a), c.key(&b));
    }

    #[test]
    fn test_geometry_signature_differs_on_diameter() {
        let params = vec!["tool_diameter".to_string()];
        let a = Tool::new("a").with_parameter("tool_diameter", 6.0);
        let b = Tool::new("b").with_parameter("tool_diameter", 8.0);
        assert_ne!(geometry_signature(&a, &params), geometry_signature(&b, &params));
        assert_eq!(geometry_signature(&Tool::new("c"), &params), None);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!(CorrelationMode::parse("product-id").unwrap(), CorrelationMode::ProductId);
        assert_eq!(CorrelationMode::parse("Geometry").unwrap(), CorrelationMode::Geometry);
        assert!(CorrelationMode::parse("color").is_err());
        assert_eq!(DescriptionMatch::parse("contains").unwrap(), DescriptionMatch::Contains);
    }
}
