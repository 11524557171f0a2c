//! Formula engine error types

use thiserror::Error;

/// Result type for evaluation operations
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating a formula chain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Context-level failure: a missing binding or an invalid die size
    #[error(transparent)]
    Context(#[from] mythsheets_core::Error),

    /// A division step was asked to divide by zero
    #[error("division by zero in {identification}")]
    DivisionByZero { identification: String },

    /// The caller seeded the context without every key the chain declared
    #[error("cannot seed chain: missing dependencies [{}]", .missing.join(", "))]
    UnsatisfiedDependency { missing: Vec<String> },

    /// The chain failed its static semantics check
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Structured report from the semantics validator.
///
/// Carries enough to point at the offending step; a chain producing one of
/// these is never handed to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A step's declared input type does not match the running type
    #[error("step {step_index} ({identification}): expected {expected}, found {found}")]
    TypeMismatch {
        step_index: usize,
        identification: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The final running type does not match the chain's declared output
    #[error("chain output: expected {expected}, found {found}")]
    OutputMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
