//! Dice rolling behind an injectable random source

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Sides on the initiative die
pub const D20: u32 = 20;

/// Source of die rolls
pub trait DiceRoller {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`
    fn roll(&mut self, sides: u32) -> u32;
}

/// Dice roller backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngDiceRoller<R: RngCore = StdRng> {
    rng: R,
}

impl<R: RngCore> RngDiceRoller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDiceRoller<StdRng> {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sequence for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> DiceRoller for RngDiceRoller<R> {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

impl<T: DiceRoller + ?Sized> DiceRoller for Box<T> {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }
}

/// Roll a d20 for initiative
pub fn roll_initiative<D: DiceRoller + ?Sized>(roller: &mut D) -> i32 {
    // 1..=20 always fits
    roller.roll(D20) as i32
}
