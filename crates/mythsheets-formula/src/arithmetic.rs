//! Standard arithmetic calculation steps
//!
//! Each variant applies one literal operand to the chain's running value,
//! bound under [`keys::VALUE`]. Numeric policy for the whole chain: IEEE-754
//! `f64` throughout, with rounding performed only where a step says so
//! (see [`Rounding`]), never implicitly.

use crate::calculation::{Calculation, ValueType};
use crate::dependency::DependencyCollector;
use crate::error::{EvalError, EvalResult, ValidationError};
use crate::semantics::FormulaSemantics;
use mythsheets_core::{keys, EvalContext};

fn validate_numeric(
    semantics: &FormulaSemantics,
    identification: &str,
) -> Result<ValueType, ValidationError> {
    let numeric = ValueType::of::<f64>();
    semantics.expect(numeric, identification)?;
    Ok(numeric)
}

/// Adds a literal operand to the running value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Add {
    operand: f64,
}

impl Add {
    pub fn new(operand: f64) -> Self {
        Self { operand }
    }
}

impl Calculation<f64> for Add {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        let value = ctx.get(&keys::VALUE)?;
        Ok(value + self.operand)
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::VALUE);
    }

    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        validate_numeric(semantics, self.identification())
    }

    fn identification(&self) -> &str {
        "ADD"
    }

    fn instructions(&self) -> &str {
        "+"
    }
}

/// Subtracts a literal operand from the running value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subtract {
    operand: f64,
}

impl Subtract {
    pub fn new(operand: f64) -> Self {
        Self { operand }
    }
}

impl Calculation<f64> for Subtract {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        let value = ctx.get(&keys::VALUE)?;
        Ok(value - self.operand)
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::VALUE);
    }

    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        validate_numeric(semantics, self.identification())
    }

    fn identification(&self) -> &str {
        "SUBTRACT"
    }

    fn instructions(&self) -> &str {
        "-"
    }
}

/// Multiplies the running value by a literal operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multiply {
    operand: f64,
}

impl Multiply {
    pub fn new(operand: f64) -> Self {
        Self { operand }
    }
}

impl Calculation<f64> for Multiply {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        let value = ctx.get(&keys::VALUE)?;
        Ok(value * self.operand)
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::VALUE);
    }

    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        validate_numeric(semantics, self.identification())
    }

    fn identification(&self) -> &str {
        "MULTIPLY"
    }

    fn instructions(&self) -> &str {
        "*"
    }
}

/// Divides the running value by a literal operand.
///
/// A zero operand always fails with [`EvalError::DivisionByZero`]; the step
/// never returns infinity or NaN silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divide {
    operand: f64,
}

impl Divide {
    pub fn new(operand: f64) -> Self {
        Self { operand }
    }
}

impl Calculation<f64> for Divide {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        if self.operand == 0.0 {
            return Err(EvalError::DivisionByZero {
                identification: self.identification().to_string(),
            });
        }
        let value = ctx.get(&keys::VALUE)?;
        Ok(value / self.operand)
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::VALUE);
    }

    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        validate_numeric(semantics, self.identification())
    }

    fn identification(&self) -> &str {
        "DIVIDE"
    }

    fn instructions(&self) -> &str {
        "/"
    }
}

/// Named rounding strategy for halving steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// `ceil(v / 2)`
    Up,
    /// `floor(v / 2)`
    Down,
}

impl Rounding {
    /// Halve `v` under this strategy.
    pub fn halve(self, v: f64) -> f64 {
        match self {
            Rounding::Up => (v / 2.0).ceil(),
            Rounding::Down => (v / 2.0).floor(),
        }
    }
}

/// Halves the running value under a named [`Rounding`] strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halve {
    rounding: Rounding,
}

impl Halve {
    /// `HALFROUNDUP`: half the running value, rounded up.
    pub fn round_up() -> Self {
        Self {
            rounding: Rounding::Up,
        }
    }

    /// `HALFROUNDDOWN`: half the running value, rounded down.
    pub fn round_down() -> Self {
        Self {
            rounding: Rounding::Down,
        }
    }
}

impl Calculation<f64> for Halve {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        let value = ctx.get(&keys::VALUE)?;
        Ok(self.rounding.halve(*value))
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::VALUE);
    }

    fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        validate_numeric(semantics, self.identification())
    }

    fn identification(&self) -> &str {
        self.instructions()
    }

    fn instructions(&self) -> &str {
        match self.rounding {
            Rounding::Up => "HALFROUNDUP",
            Rounding::Down => "HALFROUNDDOWN",
        }
    }
}
