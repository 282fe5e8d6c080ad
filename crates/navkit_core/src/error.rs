//! Navigation error types

use thiserror::Error;

/// Errors reported by the navigation widgets
///
/// None of these ever reach the user: widgets degrade to a safe visual
/// default and hand the error to the caller for logging.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// A tuning value is out of its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An event referenced an item key that is not in the current list
    #[error("unknown item: {0}")]
    UnknownItem(String),
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavError>;
