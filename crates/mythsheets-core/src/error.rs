//! Error types for mythsheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mythsheets-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A calculation read a context slot that was never bound
    #[error("no binding for key `{key}` (expected {type_name})")]
    MissingBinding {
        key: &'static str,
        type_name: &'static str,
    },

    /// A die roll was requested with a non-positive number of sides
    #[error("invalid die size {0}: sides must be > 0")]
    InvalidDieSize(i32),
}
