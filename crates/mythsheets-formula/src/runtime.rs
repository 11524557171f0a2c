//! Formula chain runtime
//!
//! A [`FormulaChain`] owns an ordered sequence of calculations computing one
//! statistic. Construction orders the steps (stable sort on inherent
//! priority, submission order breaking ties), runs the semantics validator,
//! and caches the chain's dependency set. An invalid chain cannot be
//! constructed, so the runtime never sees one.
//!
//! Per-evaluation lifecycle is a consuming method chain:
//!
//! ```text
//! chain.begin().seed(ctx)?.run()
//! ```
//!
//! Seeding fails with [`EvalError::UnsatisfiedDependency`] if the context
//! lacks any declared dependency; execution never starts. `run` threads the
//! running value through the steps in order and returns the last step's
//! result, or the first step error with no partial result. The runtime itself
//! introduces no nondeterminism; repeated runs over an identical seeded
//! context yield identical results unless an injected capability (a dice
//! source) is itself nondeterministic.

use crate::calculation::{Calculation, ValueType};
use crate::dependency::{DependencyCollector, DependencySet};
use crate::error::{EvalError, EvalResult, ValidationError};
use crate::semantics::validate_chain;
use mythsheets_core::{keys, EvalContext};
use std::fmt;
use std::sync::Arc;

/// A compiled, validated sequence of calculations producing a `T`.
///
/// Chains are immutable and `Send + Sync`; one chain instance safely serves
/// concurrent evaluations, each with its own context.
pub struct FormulaChain<T: 'static> {
    steps: Vec<Arc<dyn Calculation<T>>>,
    input: ValueType,
    output: ValueType,
    dependencies: DependencySet,
}

impl<T: 'static> FormulaChain<T> {
    /// Build a chain from compiler-supplied steps and declared input/output
    /// types.
    ///
    /// Steps are stably sorted by [`inherent_priority`]
    /// (lower first; equal priorities keep submission order), then validated.
    /// A chain that fails validation is never constructed.
    ///
    /// [`inherent_priority`]: Calculation::inherent_priority
    pub fn new(
        mut steps: Vec<Arc<dyn Calculation<T>>>,
        input: ValueType,
        output: ValueType,
    ) -> Result<Self, ValidationError> {
        steps.sort_by_key(|step| step.inherent_priority());
        validate_chain(&steps, input, output)?;

        let mut collector = DependencyCollector::new();
        for step in &steps {
            step.collect_dependencies(&mut collector);
        }

        Ok(Self {
            steps,
            input,
            output,
            dependencies: collector.finish(),
        })
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[Arc<dyn Calculation<T>>] {
        &self.steps
    }

    /// The chain's declared input type.
    pub fn input_type(&self) -> ValueType {
        self.input
    }

    /// The chain's declared output type.
    pub fn output_type(&self) -> ValueType {
        self.output
    }

    /// The cached dependency set: every slot that must be seeded before
    /// this chain can run.
    pub fn dependencies(&self) -> &DependencySet {
        &self.dependencies
    }

    /// Start a new evaluation of this chain.
    pub fn begin(&self) -> ChainEvaluation<'_, T> {
        ChainEvaluation { chain: self }
    }
}

impl<T: Clone + Send + Sync + 'static> FormulaChain<T> {
    /// One-shot evaluation: seed from `ctx` and run to completion.
    pub fn evaluate(&self, ctx: &EvalContext) -> EvalResult<T> {
        self.begin().seed(ctx.clone())?.run()
    }
}

impl FormulaChain<f64> {
    /// Build a numeric chain: input and output are both `f64`.
    pub fn numeric(steps: Vec<Arc<dyn Calculation<f64>>>) -> Result<Self, ValidationError> {
        let numeric = ValueType::of::<f64>();
        Self::new(steps, numeric, numeric)
    }
}

// Manual impl: the step list is trait objects, so derive is unavailable.
// Steps render by identification.
impl<T: 'static> fmt::Debug for FormulaChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<&str> = self.steps.iter().map(|step| step.identification()).collect();
        f.debug_struct("FormulaChain")
            .field("steps", &steps)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

/// An evaluation that has not yet been seeded.
pub struct ChainEvaluation<'c, T: 'static> {
    chain: &'c FormulaChain<T>,
}

impl<'c, T: 'static> ChainEvaluation<'c, T> {
    /// Seed the evaluation with the caller-supplied context.
    ///
    /// Every slot in the chain's dependency set must be bound, or seeding
    /// fails immediately with [`EvalError::UnsatisfiedDependency`] and
    /// execution never starts.
    pub fn seed(self, ctx: EvalContext) -> EvalResult<SeededEvaluation<'c, T>> {
        let missing = self.chain.dependencies.missing_from(&ctx);
        if !missing.is_empty() {
            return Err(EvalError::UnsatisfiedDependency {
                missing: missing.iter().map(ToString::to_string).collect(),
            });
        }
        Ok(SeededEvaluation {
            chain: self.chain,
            ctx,
        })
    }
}

/// A seeded evaluation, ready to run.
pub struct SeededEvaluation<'c, T: 'static> {
    chain: &'c FormulaChain<T>,
    ctx: EvalContext,
}

impl<T: Clone + Send + Sync + 'static> SeededEvaluation<'_, T> {
    /// Execute the steps in chain order.
    ///
    /// Each step's result is rebound as the running value feeding the next
    /// step; the final step's result is the chain's result. The first step
    /// error aborts the run and is returned unchanged.
    pub fn run(self) -> EvalResult<T> {
        let value_key = keys::running_value::<T>();
        let mut ctx = self.ctx;
        let mut result: Option<T> = None;

        for step in &self.chain.steps {
            let value = step.process(&ctx)?;
            ctx = ctx.with(&value_key, value.clone());
            result = Some(value);
        }

        match result {
            Some(value) => Ok(value),
            // A step-less chain yields its seeded running value.
            None => Ok(ctx.get(&value_key)?.clone()),
        }
    }
}

impl<T: 'static> fmt::Debug for SeededEvaluation<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededEvaluation")
            .field("chain", &self.chain)
            .field("ctx", &self.ctx)
            .finish()
    }
}
