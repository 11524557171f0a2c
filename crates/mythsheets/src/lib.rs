//! # mythsheets
//!
//! A formula-evaluation engine for tabletop-RPG character sheets.
//!
//! Mythsheets expresses a character statistic (hit points, attack bonus,
//! spell DC, ...) as a chain of composable, typed calculations. Chains are
//! validated for type correctness before they may execute, declare their
//! data dependencies up front, and read every input (including the dice
//! roller) from an immutable per-evaluation context.
//!
//! ## Example
//!
//! ```rust
//! use mythsheets::prelude::*;
//! use std::sync::Arc;
//!
//! // A rule compiler hands the engine an ordered list of steps.
//! let chain = FormulaChain::numeric(vec![
//!     Arc::new(Add::new(5.0)),
//!     Arc::new(Multiply::new(2.0)),
//! ])
//! .unwrap();
//!
//! // The character store seeds every declared dependency.
//! let ctx = EvalContext::new().with(&keys::VALUE, 10.0);
//! assert_eq!(chain.evaluate(&ctx).unwrap(), 30.0);
//! ```

pub mod prelude;

// Re-export core types
pub use mythsheets_core::{
    keys, AverageRoller, Dice, DiceRoller, Error, EvalContext, FixedRoller, KeyRef, Result,
    RngRoller, TypedKey,
};

// Re-export formula types
pub use mythsheets_formula::{
    validate_chain, Add, AttackRoll, Calculation, ChainEvaluation, DependencyCollector,
    DependencySet, Divide, EvalError, EvalResult, FormulaChain, FormulaSemantics, Halve,
    HitPoints, Multiply, Outcome, Rounding, SeededEvaluation, Subtract, ValidationError,
    ValueType,
};
