//! Error types for the plan inspector.
//!
//! This module provides the error hierarchy for every stage of an inspection:
//! configuration loading, plan parsing, and output.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the plan inspector.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// Plan parsing errors.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A matching pattern failed to compile.
    #[error("Pattern compilation error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while turning plan text into a [`Plan`](crate::plan::Plan).
///
/// Parsing is all-or-nothing: the first failing stage aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Neither the action legend nor the no-changes sentinel is present.
    #[error("input is not a recognizable terraform plan: {reason}")]
    InvalidFormat {
        /// What was missing.
        reason: String,
    },

    /// The actions marker was required but absent.
    #[error("failed to find \"Terraform will perform the following actions\"")]
    MissingActionsMarker,

    /// A change block did not have the expected shape.
    #[error("malformed change block at line {line}: {reason} (captured {captured} of 5 fields)")]
    MalformedChangeBlock {
        /// Description of the problem.
        reason: String,
        /// Number of fields captured before the failure.
        captured: usize,
        /// 1-based line, within its segment, where the block starts.
        line: usize,
    },

    /// A change indicator outside the known symbol set.
    #[error("unrecognized action {token:?}")]
    UnrecognizedAction {
        /// The offending indicator token.
        token: String,
    },
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },
}

/// Result type alias for inspector operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

impl InspectorError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ParseError {
    /// Creates an invalid format error.
    #[must_use]
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Creates a malformed block error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>, captured: usize, line: usize) -> Self {
        Self::MalformedChangeBlock {
            reason: reason.into(),
            captured,
            line,
        }
    }

    /// Creates an unrecognized action error.
    #[must_use]
    pub fn unrecognized_action(token: impl Into<String>) -> Self {
        Self::UnrecognizedAction {
            token: token.into(),
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a validation error without a specific field.
    #[must_use]
    pub fn validation_general(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }
}
