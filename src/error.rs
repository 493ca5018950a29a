//! Error types for the timegrid engine.
//!
//! Only caller-configuration mistakes surface through this type. Expected
//! malformed user input (a bad date string, a bad time value) is signaled
//! with `None` by the parsers and never raised as an error.

use thiserror::Error;

/// Errors raised when disabled-date rules are structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimegridError {
    #[error("Invalid disabled-date rule '{0}'. Expected YYYY-MM-DD")]
    InvalidRuleDate(String),

    #[error("Invalid disabled-date range ['{start}', '{end}']. Both ends must be YYYY-MM-DD")]
    InvalidRuleRange { start: String, end: String },
}

/// Result type alias for timegrid operations.
pub type TimegridResult<T> = Result<T, TimegridError>;
