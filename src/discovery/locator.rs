//! Listing library assets and folders below a location.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::{LibraryLocation, LibraryUrl};
use crate::error::{Result, ToolSyncError};

/// Source of the hierarchical library listing.
pub trait LibraryLocator {
    /// Root of a location, `None` when the location is unavailable.
    fn root(&self, location: LibraryLocation) -> Option<LibraryUrl>;

    /// Library assets directly inside a folder.
    fn child_assets(&self, folder: &LibraryUrl) -> Result<Vec<LibraryUrl>>;

    /// Sub-folders directly inside a folder.
    fn child_folders(&self, folder: &LibraryUrl) -> Result<Vec<LibraryUrl>>;
}

/// Locator over directories on disk: files matching the asset glob are
/// libraries, sub-directories are folders.
#[derive(Debug, Clone)]
pub struct FsLocator {
    roots: HashMap<LibraryLocation, PathBuf>,
    asset_pattern: glob::Pattern,
    skip_hidden: bool,
}

impl FsLocator {
    pub fn new(asset_pattern: &str) -> Result<Self> {
        let asset_pattern = glob::Pattern::new(asset_pattern)
            .map_err(|e| ToolSyncError::InvalidArgument(format!("bad asset pattern {}: {}", asset_pattern, e)))?;
        Ok(Self {
            roots: HashMap::new(),
            asset_pattern,
            skip_hidden: true,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut locator = Self::new(&config.discovery.asset_pattern)?.skip_hidden(config.discovery.skip_hidden);
        for location in LibraryLocation::all() {
            if let Some(root) = config.locations.root(location) {
                locator = locator.with_root(location, root);
            }
        }
        Ok(locator)
    }

    pub fn with_root(mut self, location: LibraryLocation, path: impl Into<PathBuf>) -> Self {
        self.roots.insert(location, path.into());
        self
    }

    pub fn skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Filesystem path an identifier points at.
    pub fn path_of(&self, url: &LibraryUrl) -> Result<PathBuf> {
        let root = self
            .roots
            .get(&url.location)
            .ok_or_else(|| ToolSyncError::LibraryNotFound(format!("no root configured for {}", url.location)))?;
        Ok(url
            .path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.clone(), |acc, segment| acc.join(segment)))
    }

    /// Sorted child names of a folder for which `keep` holds.
    fn list(&self, folder: &LibraryUrl, keep: impl Fn(&fs::DirEntry, &str) -> bool) -> Result<Vec<LibraryUrl>> {
        let dir = self.path_of(folder)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if self.skip_hidden && name.starts_with('.') {
                continue;
            }
            if keep(&entry, &name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names.iter().map(|n| folder.join(n)).collect())
    }
}

impl LibraryLocator for FsLocator {
    fn root(&self, location: LibraryLocation) -> Option<LibraryUrl> {
        let path = self.roots.get(&location)?;
        if !path.is_dir() {
            log::warn!("{} library root {} is not a directory, skipping", location, path.display());
            return None;
        }
        Some(LibraryUrl::root(location))
    }

    fn child_assets(&self, folder: &LibraryUrl) -> Result<Vec<LibraryUrl>> {
        self.list(folder, |entry, name| {
            entry.path().is_file() && self.asset_pattern.matches(name)
        })
    }

    fn child_folders(&self, folder: &LibraryUrl) -> Result<Vec<LibraryUrl>> {
        // Symlinked directories are not followed
        self.list(folder, |entry, _| entry.file_type().is_ok_and(|t| t.is_dir()))
    }
}
