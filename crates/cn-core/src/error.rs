//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface clock or configuration failures.

use thiserror::Error;

/// The error type for `cn-core`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid time of day {hours:02}:{minutes:02}")]
    InvalidTime { hours: u32, minutes: u32 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
