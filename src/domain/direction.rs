//! Sync direction and the commit policy it implies

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolSyncError};

/// Which way tool data flows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncDirection {
    /// External library into the document library
    Pull,
    /// Document library out to the external library
    Push,
}

impl SyncDirection {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pull" => Ok(Self::Pull),
            "push" => Ok(Self::Push),
            other => Err(ToolSyncError::InvalidArgument(format!("unknown sync direction: {}", other))),
        }
    }

    /// Commit policy of the store being written in this direction
    pub fn commit_policy(&self) -> CommitPolicy {
        CommitPolicy::for_direction(*self)
    }
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pull => f.write_str("pull"),
            Self::Push => f.write_str("push"),
        }
    }
}

/// How updated target tools are flushed to their store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Each tool is committed right after it is merged
    PerTool,
    /// The whole library is committed once after the scan
    Batched,
}

impl CommitPolicy {
    /// The document store updates tool by tool, external libraries as a whole.
    pub fn for_direction(direction: SyncDirection) -> Self {
        match direction {
            SyncDirection::Pull => Self::PerTool,
            SyncDirection::Push => Self::Batched,
        }
    }
}
