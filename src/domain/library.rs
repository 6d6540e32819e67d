//! Tool libraries and the identifiers used to address them

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tool::Tool;
use crate::error::{Result, ToolSyncError};

/// Where a library is stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LibraryLocation {
    Cloud,
    Local,
    External,
}

impl LibraryLocation {
    /// All locations in discovery order
    pub fn all() -> [LibraryLocation; 3] {
        [Self::Cloud, Self::Local, Self::External]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
            Self::External => "external",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "local" => Ok(Self::Local),
            "external" => Ok(Self::External),
            other => Err(ToolSyncError::InvalidArgument(format!("unknown library location: {}", other))),
        }
    }
}

impl fmt::Display for LibraryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path-like identifier of a library: `<location>://<relative/path>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryUrl {
    pub location: LibraryLocation,
    /// Forward-slash separated path below the location root. Empty for the root itself.
    pub path: String,
}

impl LibraryUrl {
    pub fn root(location: LibraryLocation) -> Self {
        Self {
            location,
            path: String::new(),
        }
    }

    /// Child identifier one segment below this one
    pub fn join(&self, segment: &str) -> Self {
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.path, segment)
        };
        Self {
            location: self.location,
            path,
        }
    }

    /// Last path segment, used as the human-readable library name
    pub fn display_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let (location, path) = s
            .split_once("://")
            .ok_or_else(|| ToolSyncError::InvalidArgument(format!("not a library url: {}", s)))?;
        Ok(Self {
            location: LibraryLocation::parse(location)?,
            path: path.trim_matches('/').to_string(),
        })
    }
}

impl fmt::Display for LibraryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.location, self.path)
    }
}

/// An ordered collection of tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolLibrary {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl ToolLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn tool(&self, guid: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.guid == guid)
    }

    /// Replace the tool sharing `tool.guid` in place
    pub fn replace_tool(&mut self, tool: &Tool) -> Result<()> {
        let slot = self
            .tools
            .iter_mut()
            .find(|t| t.guid == tool.guid)
            .ok_or_else(|| ToolSyncError::ToolNotFound(tool.guid.clone()))?;
        *slot = tool.clone();
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
