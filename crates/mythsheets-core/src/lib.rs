//! # mythsheets-core
//!
//! Core evaluation types for the mythsheets character-sheet engine.
//!
//! This crate provides the fundamental types shared by the formula engine
//! and the surrounding application:
//! - [`TypedKey`] - strongly-typed identifiers for context slots
//! - [`EvalContext`] - the immutable, per-evaluation key→value store
//! - [`DiceRoller`] - the injected randomness capability, with production
//!   ([`RngRoller`]) and deterministic ([`FixedRoller`], [`AverageRoller`])
//!   implementations
//!
//! ## Example
//!
//! ```rust
//! use mythsheets_core::{keys, AverageRoller, Dice, EvalContext};
//! use std::sync::Arc;
//!
//! let ctx = EvalContext::new()
//!     .with(&keys::VALUE, 10.0)
//!     .with(&keys::DICE, Arc::new(AverageRoller) as Dice);
//!
//! assert_eq!(*ctx.get(&keys::VALUE).unwrap(), 10.0);
//! assert_eq!(ctx.get(&keys::DICE).unwrap().roll(8).unwrap(), 5);
//! ```

pub mod context;
pub mod dice;
pub mod error;
pub mod key;

// Re-exports for convenience
pub use context::EvalContext;
pub use dice::{AverageRoller, Dice, DiceRoller, FixedRoller, RngRoller};
pub use error::{Error, Result};
pub use key::{keys, KeyRef, TypedKey};
