//! In-memory tool library store.
//!
//! Useful for embedding and testing: commits are applied to the held library
//! and recorded in order so callers can inspect how a pass persisted.

use super::traits::{ToolLibrarySink, ToolLibrarySource};
use crate::domain::{Tool, ToolLibrary};
use crate::error::{Result, ToolSyncError};

/// One commit received by a [`MemoryLibraryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRecord {
    /// A single tool, by guid
    Tool(String),
    /// The whole library
    Library,
}

/// Tool library held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLibraryStore {
    name: String,
    library: ToolLibrary,
    commits: Vec<CommitRecord>,
    fail_commits_for: Vec<String>,
    fail_library_commit: bool,
}

impl MemoryLibraryStore {
    pub fn new(library: ToolLibrary) -> Self {
        Self {
            name: format!("memory:{}", library.name),
            library,
            commits: Vec::new(),
            fail_commits_for: Vec::new(),
            fail_library_commit: false,
        }
    }

    /// Reject per-tool commits of the given guid, as a failing store would.
    pub fn fail_commits_for(mut self, guid: impl Into<String>) -> Self {
        self.fail_commits_for.push(guid.into());
        self
    }

    /// Reject whole-library commits.
    pub fn fail_library_commit(mut self) -> Self {
        self.fail_library_commit = true;
        self
    }

    pub fn library(&self) -> &ToolLibrary {
        &self.library
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }
}

impl ToolLibrarySource for MemoryLibraryStore {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<ToolLibrary> {
        Ok(self.library.clone())
    }
}

impl ToolLibrarySink for MemoryLibraryStore {
    fn commit_tool(&mut self, tool: &Tool) -> Result<()> {
        if self.fail_commits_for.contains(&tool.guid) {
            return Err(ToolSyncError::Storage(format!("commit rejected for {}", tool.guid)));
        }
        self.library.replace_tool(tool)?;
        self.commits.push(CommitRecord::Tool(tool.guid.clone()));
        Ok(())
    }

    fn commit_library(&mut self, library: &ToolLibrary) -> Result<()> {
        if self.fail_library_commit {
            return Err(ToolSyncError::Storage(format!("commit rejected for {}", library.name)));
        }
        self.library = library.clone();
        self.commits.push(CommitRecord::Library);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_are_recorded_in_order() {
        let lib = ToolLibrary::new("doc").with_tool(Tool::new("a")).with_tool(Tool::new("b"));
        let mut store = MemoryLibraryStore::new(lib.clone());

        store.commit_tool(&Tool::new("b").with_comment("B")).unwrap();
        store.commit_library(&lib).unwrap();

        assert_eq!(
            store.commits(),
            &[CommitRecord::Tool("b".to_string()), CommitRecord::Library]
        );
        assert_eq!(store.library(), &lib);
    }

    #[test]
    fn test_failing_commit() {
        let lib = ToolLibrary::new("doc").with_tool(Tool::new("a"));
        let mut store = MemoryLibraryStore::new(lib).fail_commits_for("a");
        assert!(store.commit_tool(&Tool::new("a")).is_err());
        assert!(store.commits().is_empty());
    }

    #[test]
    fn test_failing_library_commit() {
        let lib = ToolLibrary::new("doc").with_tool(Tool::new("a"));
        let mut store = MemoryLibraryStore::new(lib.clone()).fail_library_commit();
        let changed = ToolLibrary::new("doc").with_tool(Tool::new("a").with_comment("A"));
        assert!(store.commit_library(&changed).is_err());
        assert!(store.commits().is_empty());
        assert_eq!(store.library(), &lib);
    }

    #[test]
    fn test_describe() {
        let store = MemoryLibraryStore::new(ToolLibrary::new("Mill tools"));
        assert_eq!(store.describe(), "memory:Mill tools");
    }
}
