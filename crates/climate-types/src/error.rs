//! Error types for climate-types.

use thiserror::Error;

/// Errors that can occur when parsing user-supplied climate query input.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DateError {
    /// The input is not a calendar date in `YYYY-MM-DD` form.
    #[error("Invalid date '{input}': expected format YYYY-MM-DD")]
    Invalid {
        /// The rejected input.
        input: String,
    },
}

/// Result type alias using climate-types' DateError type.
pub type DateResult<T> = std::result::Result<T, DateError>;
