//! Error types for toolsync
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while syncing tool libraries
#[derive(Debug, Error)]
pub enum ToolSyncError {
    /// No discovered library carries the requested display name
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    /// Tool guid not present in the library being written
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Parameter name not present on a tool or preset
    #[error("Parameter not found: {0}")]
    ParameterNotFound(String),

    /// Parameter value kinds differ between source and target
    #[error("Type mismatch for {name}: expected {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Target parameter cannot be written
    #[error("Parameter is read-only: {0}")]
    ReadOnlyParameter(String),

    /// Unparseable direction, mode or strategy name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Library persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for toolsync operations
pub type Result<T> = std::result::Result<T, ToolSyncError>;
