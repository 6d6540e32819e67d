//! Domain types for toolsync
//!
//! - Tool, Preset, Parameter: the cutting-tool data being synced
//! - ToolLibrary, LibraryUrl: collections of tools and their identifiers
//! - SyncDirection, CommitPolicy: which way a pass runs and how it persists
//! - SyncReport: what a pass changed

pub mod direction;
pub mod library;
pub mod report;
pub mod tool;

pub use direction::{CommitPolicy, SyncDirection};
pub use library::{LibraryLocation, LibraryUrl, ToolLibrary};
pub use report::{AmbiguousMatch, CommitFailure, ParameterFailure, PresetAddition, SyncReport};
pub use tool::{Parameter, ParameterValue, Parameters, Preset, Tool};
