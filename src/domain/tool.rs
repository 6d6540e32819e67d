//! Tool, preset and parameter types
//!
//! A tool is an ordered list of named parameters plus a set of presets that
//! are unique by name. Parameter names follow the CAM host's `tool_*`
//! convention so library files exported by the host map over directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolSyncError};

/// Free-text tool comment, the default correlation key
pub const COMMENT_PARAMETER: &str = "tool_comment";

/// Vendor product identifier
pub const PRODUCT_ID_PARAMETER: &str = "tool_productId";

/// Gauge length of the physical holder assembly. Machine setup data, never synced.
pub const ASSEMBLY_GAUGE_LENGTH_PARAMETER: &str = "tool_assemblyGaugeLength";

/// Human-readable tool description
pub const DESCRIPTION_PARAMETER: &str = "tool_description";

/// Parameters hashed into the geometry signature unless configured otherwise
pub const DEFAULT_GEOMETRY_PARAMETERS: [&str; 6] = [
    "tool_type",
    "tool_diameter",
    "tool_cornerRadius",
    "tool_fluteLength",
    "tool_numberOfFlutes",
    "tool_taperAngle",
];

/// Value of a single tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ParameterValue {
    Number(f64),
    Integer(i64),
    Boolean(bool),
    /// One value out of a host-defined enumeration
    Choice(String),
    Text(String),
}

impl ParameterValue {
    /// Short name of the value kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Choice(_) => "choice",
            Self::Text(_) => "text",
        }
    }

    /// Check whether two values are of the same kind
    pub fn same_kind(&self, other: &ParameterValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// String content of choice and text values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Choice(s) | Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A named parameter on a tool or preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,

    /// Derived values the host computes itself
    #[serde(default, skip_serializing_if = "is_false")]
    pub read_only: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            read_only: false,
        }
    }

    pub fn read_only(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            read_only: true,
            ..Self::new(name, value)
        }
    }
}

/// Ordered parameter list, addressed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&ParameterValue> {
        self.get(name).map(|p| &p.value)
    }

    /// Overwrite the value of an existing parameter.
    ///
    /// Returns whether the stored value changed. Fails when the parameter is
    /// missing, read-only, or holds a value of a different kind.
    pub fn set(&mut self, name: &str, value: &ParameterValue) -> Result<bool> {
        let param = self
            .0
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ToolSyncError::ParameterNotFound(name.to_string()))?;

        if param.read_only {
            return Err(ToolSyncError::ReadOnlyParameter(name.to_string()));
        }
        if !param.value.same_kind(value) {
            return Err(ToolSyncError::TypeMismatch {
                name: name.to_string(),
                expected: param.value.kind(),
                found: value.kind(),
            });
        }
        if param.value == *value {
            return Ok(false);
        }
        param.value = value.clone();
        Ok(true)
    }

    /// Insert a parameter, replacing any existing one with the same name
    pub fn insert(&mut self, parameter: Parameter) {
        match self.0.iter_mut().find(|p| p.name == parameter.name) {
            Some(existing) => *existing = parameter,
            None => self.0.push(parameter),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|p| p.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named bundle of parameter overrides layered on a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(Parameter::new(name, value));
        self
    }
}

/// A cutting tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Stable identity inside its library
    pub guid: String,

    #[serde(default)]
    pub parameters: Parameters,

    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl Tool {
    pub fn new(guid: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            parameters: Parameters::new(),
            presets: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(Parameter::new(name, value));
        self
    }

    pub fn with_read_only_parameter(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.parameters.insert(Parameter::read_only(name, value));
        self
    }

    pub fn with_comment(self, comment: &str) -> Self {
        self.with_parameter(COMMENT_PARAMETER, comment)
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.add_preset(preset);
        self
    }

    pub fn value(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.value(name)
    }

    /// String content of a choice or text parameter
    pub fn text(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(|v| v.as_str())
    }

    pub fn comment(&self) -> Option<&str> {
        self.text(COMMENT_PARAMETER)
    }

    /// Label for log lines: comment, then description, then guid
    pub fn label(&self) -> &str {
        [self.comment(), self.text(DESCRIPTION_PARAMETER)]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or(&self.guid)
    }

    pub fn has_preset(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name == name)
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Append a preset unless one with the same name exists.
    ///
    /// Returns whether the preset was added.
    pub fn add_preset(&mut self, preset: Preset) -> bool {
        if self.has_preset(&preset.name) {
            return false;
        }
        self.presets.push(preset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endmill() -> Tool {
        Tool::new("t1")
            .with_comment("T1-6mm-Endmill")
            .with_parameter("tool_diameter", 5.9)
            .with_parameter("tool_numberOfFlutes", 2i64)
    }

    #[test]
    fn test_set_changes_value() {
        let mut tool = endmill();
        let changed = tool.parameters.set("tool_diameter", &ParameterValue::Number(6.0)).unwrap();
        assert!(changed);
        assert_eq!(tool.value("tool_diameter"), Some(&ParameterValue::Number(6.0)));
    }

    #[test]
    fn test_set_same_value_reports_unchanged() {
        let mut tool = endmill();
        let changed = tool
            .parameters
            .set("tool_numberOfFlutes", &ParameterValue::Integer(2))
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_set_missing_parameter() {
        let mut tool = endmill();
        let err = tool.parameters.set("tool_shaftDiameter", &ParameterValue::Number(6.0));
        assert!(matches!(err, Err(ToolSyncError::ParameterNotFound(_))));
    }

    #[test]
    fn test_set_type_mismatch() {
        let mut tool = endmill();
        let err = tool.parameters.set("tool_diameter", &ParameterValue::Text("6".into()));
        assert!(matches!(err, Err(ToolSyncError::TypeMismatch { .. })));
        assert_eq!(tool.value("tool_diameter"), Some(&ParameterValue::Number(5.9)));
    }

    #[test]
    fn test_set_read_only() {
        let mut tool = endmill().with_read_only_parameter("tool_bodyLength", 30.0);
        let err = tool.parameters.set("tool_bodyLength", &ParameterValue::Number(40.0));
        assert!(matches!(err, Err(ToolSyncError::ReadOnlyParameter(_))));
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut params = Parameters::new();
        params.insert(Parameter::new("a", 1.0));
        params.insert(Parameter::new("b", 2.0));
        params.insert(Parameter::new("a", 3.0));
        assert_eq!(params.names(), vec!["a", "b"]);
        assert_eq!(params.value("a"), Some(&ParameterValue::Number(3.0)));
    }

    #[test]
    fn test_presets_unique_by_name() {
        let mut tool = endmill();
        assert!(tool.add_preset(Preset::new("Roughing")));
        assert!(!tool.add_preset(Preset::new("Roughing").with_parameter("tool_spindleSpeed", 9000.0)));
        assert_eq!(tool.presets.len(), 1);
        assert!(tool.preset("Roughing").unwrap().parameters.is_empty());
    }

    #[test]
    fn test_label_fallbacks() {
        assert_eq!(endmill().label(), "T1-6mm-Endmill");
        let described = Tool::new("t2").with_parameter(DESCRIPTION_PARAMETER, "Drill 3mm");
        assert_eq!(described.label(), "Drill 3mm");
        assert_eq!(Tool::new("t3").with_comment("  ").label(), "t3");
    }

    #[test]
    fn test_value_serialization_is_tagged() {
        let json = serde_json::to_value(Parameter::new("tool_diameter", 6.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "tool_diameter", "value": {"type": "number", "value": 6.0}})
        );
    }

    #[test]
    fn test_read_only_flag_parsed() {
        let param: Parameter = serde_json::from_value(serde_json::json!({
            "name": "tool_bodyLength",
            "value": {"type": "number", "value": 30.0},
            "read_only": true
        }))
        .unwrap();
        assert!(param.read_only);
    }
}
