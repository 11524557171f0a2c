//! Static semantics validation for formula chains
//!
//! Before a chain may execute, [`validate_chain`] walks its steps in
//! execution order, threading a running [`ValueType`] from the chain's
//! declared input through each step's [`validate`](crate::Calculation::validate)
//! hook. Validation is fail-fast: the first mismatch is returned and no
//! later step is consulted, because a wrong running type poisons every
//! judgement after it. No step's `process` is ever invoked here.

use crate::calculation::{Calculation, ValueType};
use crate::error::ValidationError;
use std::sync::Arc;

/// The validator's running state, handed to each step.
#[derive(Debug, Clone, Copy)]
pub struct FormulaSemantics {
    input: ValueType,
    output: ValueType,
    current: ValueType,
    step_index: usize,
}

impl FormulaSemantics {
    pub(crate) fn new(input: ValueType, output: ValueType) -> Self {
        Self {
            input,
            output,
            current: input,
            step_index: 0,
        }
    }

    /// The chain's declared input type.
    pub fn input(&self) -> ValueType {
        self.input
    }

    /// The chain's declared output type.
    pub fn output(&self) -> ValueType {
        self.output
    }

    /// The running type at the step currently being validated.
    pub fn current(&self) -> ValueType {
        self.current
    }

    /// Index of the step currently being validated.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Check that the running type is `expected`, the common case for steps
    /// that transform the running value.
    pub fn expect(
        &self,
        expected: ValueType,
        identification: &str,
    ) -> Result<(), ValidationError> {
        if self.current == expected {
            Ok(())
        } else {
            Err(ValidationError::TypeMismatch {
                step_index: self.step_index,
                identification: identification.to_string(),
                expected: expected.name(),
                found: self.current.name(),
            })
        }
    }
}

/// Validate a chain's steps against the declared input and output types.
///
/// Returns the first mismatch found, or `Ok(())` for a well-formed chain.
pub fn validate_chain<T: 'static>(
    steps: &[Arc<dyn Calculation<T>>],
    input: ValueType,
    output: ValueType,
) -> Result<(), ValidationError> {
    let mut semantics = FormulaSemantics::new(input, output);
    for (index, step) in steps.iter().enumerate() {
        semantics.step_index = index;
        semantics.current = step.validate(&semantics)?;
    }
    if semantics.current == output {
        Ok(())
    } else {
        Err(ValidationError::OutputMismatch {
            expected: output.name(),
            found: semantics.current.name(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::Add;
    use crate::dependency::DependencyCollector;
    use crate::error::EvalResult;
    use mythsheets_core::EvalContext;
    use pretty_assertions::assert_eq;

    /// Test step that declares `bool` in, `bool` out.
    struct BoolStep;

    impl Calculation<f64> for BoolStep {
        fn process(&self, _ctx: &EvalContext) -> EvalResult<f64> {
            unreachable!("validation must reject this chain before execution")
        }

        fn collect_dependencies(&self, _deps: &mut DependencyCollector) {}

        fn validate(&self, semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
            semantics.expect(ValueType::of::<bool>(), self.identification())?;
            Ok(ValueType::of::<bool>())
        }

        fn identification(&self) -> &str {
            "BOOLSTEP"
        }

        fn instructions(&self) -> &str {
            "BOOL"
        }
    }

    fn numeric() -> ValueType {
        ValueType::of::<f64>()
    }

    #[test]
    fn test_valid_numeric_chain() {
        let steps: Vec<Arc<dyn Calculation<f64>>> =
            vec![Arc::new(Add::new(1.0)), Arc::new(Add::new(2.0))];
        assert_eq!(validate_chain(&steps, numeric(), numeric()), Ok(()));
    }

    #[test]
    fn test_empty_chain_requires_input_to_match_output() {
        let steps: Vec<Arc<dyn Calculation<f64>>> = vec![];
        assert_eq!(validate_chain(&steps, numeric(), numeric()), Ok(()));
        assert_eq!(
            validate_chain(&steps, ValueType::of::<bool>(), numeric()),
            Err(ValidationError::OutputMismatch {
                expected: "f64",
                found: "bool",
            })
        );
    }

    #[test]
    fn test_mismatch_reports_offending_step() {
        let steps: Vec<Arc<dyn Calculation<f64>>> =
            vec![Arc::new(Add::new(1.0)), Arc::new(BoolStep)];
        let err = validate_chain(&steps, numeric(), numeric()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                step_index: 1,
                identification: "BOOLSTEP".to_string(),
                expected: "bool",
                found: "f64",
            }
        );
    }

    #[test]
    fn test_fail_fast_stops_at_first_mismatch() {
        // The second BoolStep would also mismatch; only the first is reported.
        let steps: Vec<Arc<dyn Calculation<f64>>> =
            vec![Arc::new(BoolStep), Arc::new(BoolStep)];
        let err = validate_chain(&steps, numeric(), numeric()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { step_index: 0, .. }
        ));
    }
}
