//! The polymorphic calculation contract
//!
//! A [`Calculation`] is one step of a formula chain: a pure function from an
//! evaluation context to a typed result, plus static hooks for dependency
//! declaration and semantics validation. The trait is open (dyn-dispatched)
//! because rule packs define operators beyond the built-in arithmetic set.

use crate::dependency::DependencyCollector;
use crate::error::{EvalResult, ValidationError};
use crate::semantics::FormulaSemantics;
use mythsheets_core::EvalContext;
use std::any::TypeId;
use std::fmt;

/// Type-erased token for a chain's running value type.
///
/// Chains declare their input and output as `ValueType`s; the validator
/// threads one through the steps without ever executing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The token for type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Human-readable type name, as used in validation reports.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One step of a formula chain, producing a value of type `T`.
///
/// Calculations are immutable value objects: constructed once when a rule
/// definition is compiled, then shared freely across evaluations and
/// threads. All per-evaluation state lives in the [`EvalContext`].
pub trait Calculation<T>: Send + Sync {
    /// Compute this step's result from the context.
    ///
    /// Pure: no observable side effects beyond the return value. Errors
    /// propagate unchanged; a missing binding here means the step's
    /// [`collect_dependencies`](Calculation::collect_dependencies) drifted
    /// from what it actually reads, or the caller under-seeded the context.
    fn process(&self, ctx: &EvalContext) -> EvalResult<T>;

    /// Declare every context slot `process` reads.
    ///
    /// Must stay consistent with `process`; the test suite checks that the
    /// declared set is sufficient to evaluate.
    fn collect_dependencies(&self, deps: &mut DependencyCollector);

    /// Statically check this step against the chain's running type and
    /// return the step's output type. Never executes `process`.
    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError>;

    /// Stable identity used for equality, reports, and caller-side logging.
    fn identification(&self) -> &str;

    /// Human-readable operator symbol (e.g. `+`, `HALFROUNDUP`).
    fn instructions(&self) -> &str;

    /// Ordering weight within a chain; lower values execute first when the
    /// rule compiler assembled steps out of order. Ties keep submission
    /// order.
    fn inherent_priority(&self) -> i32 {
        0
    }
}
