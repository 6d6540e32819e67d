//! toolsync - keep CAM tool libraries in step
//!
//! Copies tool parameter values and missing presets between a document tool
//! library and an external tool library, matching tools by a correlation key
//! such as the tool comment. Persistence is reached only through the
//! [`library::ToolLibrarySource`] and [`library::ToolLibrarySink`] traits.

pub mod config;
pub mod correlation;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod library;
pub mod sync;

pub use error::{Result, ToolSyncError};
