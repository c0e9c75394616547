//! # Report Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  io / serde_json / toml errors ──┐                                      │
//! │                                  ├──► ReportError ──► CLI exit message  │
//! │  franchise-core errors ──────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use franchise_core::{CoreError, TransitionError, ValidationError};
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Record Files
    // =========================================================================
    #[error("Failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Malformed records in {}: {reason}", .path.display())]
    MalformedRecords { path: PathBuf, reason: String },

    #[error("Failed to serialize output: {0}")]
    SerializationFailed(String),

    // =========================================================================
    // Command Line
    // =========================================================================
    #[error("{0}")]
    Usage(String),

    // =========================================================================
    // Domain
    // =========================================================================
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ReportError {
    pub fn usage(message: impl Into<String>) -> Self {
        ReportError::Usage(message.into())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::SerializationFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(err: toml::ser::Error) -> Self {
        ReportError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use franchise_core::OrderStatus;

    #[test]
    fn test_transition_error_passes_through() {
        let err: ReportError = TransitionError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Packed,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Cannot move order from delivered to packed"
        );
    }

    #[test]
    fn test_read_failed_message() {
        let err = ReportError::ReadFailed {
            path: PathBuf::from("sales.json"),
            reason: "No such file".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to read sales.json: No such file");
    }
}
