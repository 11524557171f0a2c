//! Prelude module - common imports for mythsheets users
//!
//! ```rust
//! use mythsheets::prelude::*;
//! ```

pub use crate::{
    // Context and keys
    keys,
    // Arithmetic steps
    Add,
    // Mechanics
    AttackRoll,
    // Dice capability
    AverageRoller,

    // The calculation contract
    Calculation,
    Dice,
    DiceRoller,
    Divide,

    // Error types
    Error,
    EvalContext,
    EvalError,
    EvalResult,
    FixedRoller,

    // Chain runtime
    FormulaChain,
    Halve,
    HitPoints,
    Multiply,
    Outcome,
    Result,
    RngRoller,
    Rounding,
    Subtract,
    TypedKey,
    ValidationError,
    ValueType,
};
