//! Tool library stores.
//!
//! The synchronizer only sees the [`ToolLibrarySource`] and
//! [`ToolLibrarySink`] traits; the stores here back them with JSON files or
//! plain memory.

mod json;
mod memory;
mod traits;

pub use json::JsonLibraryStore;
pub use memory::{CommitRecord, MemoryLibraryStore};
pub use traits::{ToolLibrarySink, ToolLibrarySource};
