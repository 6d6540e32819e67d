//! Outcome of a synchronization pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::direction::SyncDirection;

/// A preset appended to a target tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetAddition {
    pub tool: String,
    pub preset: String,
}

/// A parameter whose value could not be copied. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFailure {
    pub tool: String,
    pub parameter: String,
    pub reason: String,
}

/// A target tool whose key matched more than one source tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousMatch {
    pub tool: String,
    /// Guid of the source tool that was used
    pub used: String,
    /// Guids of later source tools that matched too
    pub ignored: Vec<String>,
}

/// A per-tool commit the store rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitFailure {
    pub tool: String,
    pub reason: String,
}

/// Summary of one synchronization pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub synced_at: DateTime<Utc>,

    /// Correlation keys of every matched target tool, in target order
    pub tools_updated: Vec<String>,

    pub presets_added: Vec<PresetAddition>,

    /// Parameter values that actually changed
    pub parameters_changed: usize,

    pub parameter_failures: Vec<ParameterFailure>,
    pub ambiguous_matches: Vec<AmbiguousMatch>,
    pub commit_failures: Vec<CommitFailure>,
}

impl SyncReport {
    pub fn new(direction: SyncDirection) -> Self {
        Self {
            direction,
            synced_at: Utc::now(),
            tools_updated: Vec::new(),
            presets_added: Vec::new(),
            parameters_changed: 0,
            parameter_failures: Vec::new(),
            ambiguous_matches: Vec::new(),
            commit_failures: Vec::new(),
        }
    }

    pub fn tools_updated_count(&self) -> usize {
        self.tools_updated.len()
    }

    /// True when the pass changed nothing on the target
    pub fn is_noop(&self) -> bool {
        self.parameters_changed == 0 && self.presets_added.is_empty()
    }

    /// One-line message for the user
    pub fn summary(&self) -> String {
        let count = self.tools_updated_count();
        let noun = if count == 1 { "tool" } else { "tools" };
        format!("{} {} updated. See log for list of updated tools.", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralization() {
        let mut report = SyncReport::new(SyncDirection::Pull);
        assert_eq!(report.summary(), "0 tools updated. See log for list of updated tools.");
        report.tools_updated.push("T1".to_string());
        assert_eq!(report.summary(), "1 tool updated. See log for list of updated tools.");
    }

    #[test]
    fn test_is_noop() {
        let mut report = SyncReport::new(SyncDirection::Push);
        report.tools_updated.push("T1".to_string());
        assert!(report.is_noop());
        report.presets_added.push(PresetAddition {
            tool: "T1".to_string(),
            preset: "Roughing".to_string(),
        });
        assert!(!report.is_noop());
    }
}
