//! Dice-rolling capability
//!
//! Randomness enters the engine only as an injected capability: a
//! [`Dice`] handle bound under [`keys::DICE`](crate::keys::DICE) and looked
//! up through the context like any other binding. Calculations that roll
//! dice are tested by substituting a deterministic roller; no global RNG
//! state exists anywhere in the engine.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};

/// A source of die rolls.
///
/// `roll(sides)` returns an integer uniformly distributed in `[1, sides]`
/// and fails with [`Error::InvalidDieSize`] for `sides <= 0`. Implementations
/// must be thread-safe; the same roller may serve concurrent evaluations.
pub trait DiceRoller: Send + Sync {
    /// Roll one die with the given number of sides.
    fn roll(&self, sides: i32) -> Result<i32>;

    /// Convenience: roll a d20.
    fn d20(&self) -> Result<i32> {
        self.roll(20)
    }
}

/// Shared handle to a dice roller, as stored in the context.
pub type Dice = Arc<dyn DiceRoller>;

fn check_sides(sides: i32) -> Result<()> {
    if sides <= 0 {
        Err(Error::InvalidDieSize(sides))
    } else {
        Ok(())
    }
}

/// The production roller, backed by a seedable PRNG.
///
/// `RngRoller::new` seeds from OS entropy; [`RngRoller::seeded`] produces a
/// reproducible sequence for replayable sessions.
pub struct RngRoller {
    rng: Mutex<StdRng>,
}

impl RngRoller {
    /// Create a roller seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a roller with a fixed seed, for reproducible sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RngRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRoller for RngRoller {
    fn roll(&self, sides: i32) -> Result<i32> {
        check_sides(sides)?;
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rng.gen_range(1..=sides))
    }
}

/// Deterministic roller that returns the same face every time, clamped to
/// the die being rolled.
#[derive(Debug, Clone, Copy)]
pub struct FixedRoller(pub i32);

impl DiceRoller for FixedRoller {
    fn roll(&self, sides: i32) -> Result<i32> {
        check_sides(sides)?;
        Ok(self.0.clamp(1, sides))
    }
}

/// Deterministic "take average" roller: returns the die's mean rounded up
/// (d6 → 4, d8 → 5), the usual tabletop average-HP convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageRoller;

impl DiceRoller for AverageRoller {
    fn roll(&self, sides: i32) -> Result<i32> {
        check_sides(sides)?;
        Ok(sides / 2 + 1)
    }
}
