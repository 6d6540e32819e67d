//! JSON file-backed tool library store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::traits::{ToolLibrarySink, ToolLibrarySource};
use crate::domain::{Tool, ToolLibrary};
use crate::error::{Result, ToolSyncError};

/// A tool library persisted as a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonLibraryStore {
    path: PathBuf,
}

impl JsonLibraryStore {
    /// Open a store over an existing library file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ToolSyncError::Storage(format!("Library file not found: {}", path.display())));
        }
        Ok(Self { path })
    }

    /// Create a new library file, failing if one already exists.
    pub fn create(path: impl AsRef<Path>, library: &ToolLibrary) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            return Err(ToolSyncError::Storage(format!("Library file already exists: {}", path.display())));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let store = Self { path };
        store.write(library)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ToolLibrary> {
        let content = fs::read_to_string(&self.path)?;
        let library: ToolLibrary = serde_json::from_str(&content)?;
        Ok(library)
    }

    /// Write through a temporary sibling and rename over the original.
    fn write(&self, library: &ToolLibrary) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ToolSyncError::Storage(format!("Not a file path: {}", self.path.display())))?;
        let tmp_path = self.path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        {
            let mut file = fs::File::create(&tmp_path)?;
            serde_json::to_writer_pretty(&mut file, library)?;
            writeln!(file)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl ToolLibrarySource for JsonLibraryStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<ToolLibrary> {
        let library = self.read()?;
        log::debug!("Loaded {} tools from {}", library.len(), self.path.display());
        Ok(library)
    }
}

impl ToolLibrarySink for JsonLibraryStore {
    fn commit_tool(&mut self, tool: &Tool) -> Result<()> {
        // Re-read so only this tool's entry changes on disk
        let mut library = self.read()?;
        library.replace_tool(tool)?;
        self.write(&library)?;
        log::debug!("Committed tool {} to {}", tool.guid, self.path.display());
        Ok(())
    }

    fn commit_library(&mut self, library: &ToolLibrary) -> Result<()> {
        self.write(library)?;
        log::debug!("Committed {} tools to {}", library.len(), self.path.display());
        Ok(())
    }
}
