//! Library discovery.
//!
//! Walks the cloud, local and external locations recursively and lists every
//! library asset found, each with a display name taken from the last segment
//! of its identifier. A user picks a library by that display name.

mod locator;

pub use locator::{FsLocator, LibraryLocator};

use serde::Serialize;

use crate::domain::{LibraryLocation, LibraryUrl};
use crate::error::{Result, ToolSyncError};

/// A discovered library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    pub display_name: String,
    pub url: LibraryUrl,
}

impl LibraryEntry {
    pub fn new(url: LibraryUrl) -> Self {
        Self {
            display_name: url.display_name().to_string(),
            url,
        }
    }
}

/// Enumerates libraries through a [`LibraryLocator`]
pub struct LibraryDiscovery<L: LibraryLocator> {
    locator: L,
}

impl<L: LibraryLocator> LibraryDiscovery<L> {
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// All libraries: cloud, then local, then external. Within a folder its
    /// own assets come before the contents of its sub-folders.
    pub fn discover(&self) -> Result<Vec<LibraryEntry>> {
        let mut entries = Vec::new();
        for location in LibraryLocation::all() {
            if let Some(root) = self.locator.root(location) {
                self.walk(&root, &mut entries)?;
            }
        }
        log::debug!("Discovered {} libraries", entries.len());
        Ok(entries)
    }

    fn walk(&self, folder: &LibraryUrl, entries: &mut Vec<LibraryEntry>) -> Result<()> {
        for asset in self.locator.child_assets(folder)? {
            entries.push(LibraryEntry::new(asset));
        }
        for child in self.locator.child_folders(folder)? {
            self.walk(&child, entries)?;
        }
        Ok(())
    }

    /// First discovered library whose display name is `name`.
    pub fn resolve(&self, name: &str) -> Result<LibraryEntry> {
        let entries = self.discover()?;
        find_by_display_name(&entries, name)
            .cloned()
            .ok_or_else(|| ToolSyncError::LibraryNotFound(name.to_string()))
    }
}

/// First entry with the given display name, in discovery order
pub fn find_by_display_name<'e>(entries: &'e [LibraryEntry], name: &str) -> Option<&'e LibraryEntry> {
    entries.iter().find(|e| e.display_name == name)
}
