//! Tool library synchronization.
//!
//! [`ToolLibrarySynchronizer`] drives a pass over a target library;
//! [`merge_tool`] is the per-tool merge it applies to every match.

pub mod merge;
pub mod synchronizer;

pub use merge::{MergeOutcome, SkippedParameter, merge_tool};
pub use synchronizer::{SyncEvent, SyncOptions, ToolLibrarySynchronizer};
