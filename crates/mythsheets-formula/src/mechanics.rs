//! Game-mechanic calculations
//!
//! Higher-level calculation variants for the statistics a character sheet
//! actually displays: hit points rolled per level and attack resolution.
//! Both consume the dice capability through the context like any other
//! binding, so a deterministic roller drops in for tests and for
//! "take average" house rules.

use crate::calculation::{Calculation, ValueType};
use crate::dependency::DependencyCollector;
use crate::error::{EvalResult, ValidationError};
use crate::semantics::FormulaSemantics;
use mythsheets_core::{keys, EvalContext};

/// Hit points for a character of the level bound under [`keys::LEVEL`].
///
/// Level 1 grants the full hit die plus the Constitution modifier; every
/// further level rolls the hit die and adds the modifier. Each level
/// contributes at least 1, so rolled totals always lie within
/// [`min_hp`](HitPoints::min_hp)..=[`max_hp`](HitPoints::max_hp). Acts as a
/// producer step: it ignores any running value, so its inherent priority
/// sorts it ahead of modifier steps a rule compiler may emit out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitPoints {
    hit_die: i32,
    con_mod: i32,
}

impl HitPoints {
    pub fn new(hit_die: i32, con_mod: i32) -> Self {
        Self { hit_die, con_mod }
    }

    /// Best-case total at the given level (every roll at maximum).
    pub fn max_hp(&self, level: i32) -> i32 {
        let per_level = (self.hit_die + self.con_mod).max(1);
        per_level * level.max(1)
    }

    /// Worst-case total at the given level (every roll a 1).
    pub fn min_hp(&self, level: i32) -> i32 {
        let first = (self.hit_die + self.con_mod).max(1);
        let per_level = (1 + self.con_mod).max(1);
        first + per_level * (level.max(1) - 1)
    }
}

impl Calculation<f64> for HitPoints {
    fn process(&self, ctx: &EvalContext) -> EvalResult<f64> {
        let level = *ctx.get(&keys::LEVEL)?;
        let dice = ctx.get(&keys::DICE)?;

        let mut hp = (self.hit_die + self.con_mod).max(1);
        for _ in 2..=level {
            hp += (dice.roll(self.hit_die)? + self.con_mod).max(1);
        }
        Ok(f64::from(hp))
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::LEVEL);
        deps.require(&keys::DICE);
    }

    fn validate(&self, _semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        // Producer step: compatible with any running type, emits a number.
        Ok(ValueType::of::<f64>())
    }

    fn identification(&self) -> &str {
        "HITPOINTS"
    }

    fn instructions(&self) -> &str {
        "HP"
    }

    fn inherent_priority(&self) -> i32 {
        -10
    }
}

/// Result of one attack resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Miss,
    Hit,
    Crit,
}

/// Resolves one attack: d20 + attack bonus against target armor class.
///
/// A natural 20 is a critical hit regardless of the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackRoll;

impl AttackRoll {
    pub fn new() -> Self {
        Self
    }
}

impl Calculation<Outcome> for AttackRoll {
    fn process(&self, ctx: &EvalContext) -> EvalResult<Outcome> {
        let bonus = *ctx.get(&keys::ATTACK_BONUS)?;
        let target_ac = *ctx.get(&keys::TARGET_AC)?;
        let dice = ctx.get(&keys::DICE)?;

        let roll = dice.d20()?;
        if roll == 20 {
            Ok(Outcome::Crit)
        } else if roll + bonus >= target_ac {
            Ok(Outcome::Hit)
        } else {
            Ok(Outcome::Miss)
        }
    }

    fn collect_dependencies(&self, deps: &mut DependencyCollector) {
        deps.require(&keys::ATTACK_BONUS);
        deps.require(&keys::TARGET_AC);
        deps.require(&keys::DICE);
    }

    fn validate(&self, _semantics: &FormulaSemantics) -> Result<ValueType, ValidationError> {
        Ok(ValueType::of::<Outcome>())
    }

    fn identification(&self) -> &str {
        "ATTACKROLL"
    }

    fn instructions(&self) -> &str {
        "D20+BONUS VS AC"
    }

    fn inherent_priority(&self) -> i32 {
        -10
    }
}
