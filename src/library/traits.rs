//! Library store trait definitions.

use crate::domain::{Tool, ToolLibrary};
use crate::error::Result;

/// A tool library that can be read.
pub trait ToolLibrarySource {
    /// Human-readable identity for log lines.
    fn describe(&self) -> String;

    /// Read the current contents of the library.
    fn load(&self) -> Result<ToolLibrary>;
}

/// A tool library that can be read and written back.
///
/// Stores differ in native update granularity: some persist tool by tool,
/// others only as a whole. The synchronizer picks one of the two calls
/// according to the pass's commit policy.
pub trait ToolLibrarySink: ToolLibrarySource {
    /// Persist a single tool, identified by its guid.
    fn commit_tool(&mut self, tool: &Tool) -> Result<()>;

    /// Persist the whole library.
    fn commit_library(&mut self, library: &ToolLibrary) -> Result<()>;
}
