//! # mythsheets-formula
//!
//! Formula evaluation engine for the mythsheets character-sheet generator.
//!
//! This crate provides:
//! - The [`Calculation`] trait - one polymorphic step of a formula chain
//! - Arithmetic and rounding steps ([`Add`], [`Subtract`], [`Multiply`],
//!   [`Divide`], [`Halve`])
//! - Static semantics validation before any execution
//! - Dependency collection, so callers know which character attributes a
//!   chain reads before touching storage
//! - The [`FormulaChain`] runtime that orders, seeds, and executes steps
//! - Game-mechanic calculations ([`HitPoints`], [`AttackRoll`]) built on
//!   the same contract
//!
//! ## Example
//!
//! ```rust
//! use mythsheets_core::{keys, EvalContext};
//! use mythsheets_formula::{Add, Divide, FormulaChain, Multiply, Subtract};
//! use std::sync::Arc;
//!
//! let chain = FormulaChain::numeric(vec![
//!     Arc::new(Add::new(5.0)),
//!     Arc::new(Subtract::new(3.0)),
//!     Arc::new(Multiply::new(2.0)),
//!     Arc::new(Divide::new(4.0)),
//! ])
//! .unwrap();
//!
//! let ctx = EvalContext::new().with(&keys::VALUE, 10.0);
//! assert_eq!(chain.evaluate(&ctx).unwrap(), 6.0);
//! ```

pub mod arithmetic;
pub mod calculation;
pub mod dependency;
pub mod error;
pub mod mechanics;
pub mod runtime;
pub mod semantics;

pub use arithmetic::{Add, Divide, Halve, Multiply, Rounding, Subtract};
pub use calculation::{Calculation, ValueType};
pub use dependency::{DependencyCollector, DependencySet};
pub use error::{EvalError, EvalResult, ValidationError};
pub use mechanics::{AttackRoll, HitPoints, Outcome};
pub use runtime::{ChainEvaluation, FormulaChain, SeededEvaluation};
pub use semantics::{validate_chain, FormulaSemantics};
