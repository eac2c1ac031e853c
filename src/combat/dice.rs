//! Random sources for AI decisions and loot rolls
//!
//! Decision logic never calls a global RNG; it pulls rolls in [0, 1) from a
//! [`RandomSource`]. [`Dice`] wraps a seedable `StdRng`, [`ScriptedDice`]
//! replays a fixed sequence so tests can force a branch.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform rolls in [0, 1)
pub trait RandomSource {
    /// Next roll in [0, 1)
    fn roll(&mut self) -> f64;

    /// True with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.roll() < probability
    }
}

/// Seedable dice backed by `StdRng`
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
}

impl Dice {
    /// Dice seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible dice for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded dice if a seed is given, OS-seeded otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for Dice {
    fn roll(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of rolls.
/// Once the script runs out every roll is 1.0, so no chance ever succeeds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of rolls drawn so far, including past the end of the script
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Rolls not yet drawn
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedDice {
    fn roll(&mut self) -> f64 {
        self.consumed += 1;
        self.rolls.pop_front().unwrap_or(1.0)
    }
}
