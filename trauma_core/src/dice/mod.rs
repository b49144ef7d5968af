//! Dice oracle - d10 pools and single-die tables
//!
//! Pool convention: each d10 is a success on 8-10 and a botch on exactly 1.
//! Net successes = max(0, successes - botches).

mod rng;
mod scripted;

pub use rng::RngDice;
pub use scripted::ScriptedDice;

use serde::{Deserialize, Serialize};

/// Lowest face that counts as a success
pub const SUCCESS_FACE: u32 = 8;
/// Face that counts as a botch
pub const BOTCH_FACE: u32 = 1;
/// Sides on a pool die
pub const POOL_DIE_SIDES: u32 = 10;

/// Result of rolling a dice pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DicePoolResult {
    pub pool_size: u32,
    pub total_successes: u32,
    pub total_botches: u32,
    pub net_successes: u32,
}

impl DicePoolResult {
    /// Build a result from raw success/botch counts
    pub fn new(pool_size: u32, total_successes: u32, total_botches: u32) -> Self {
        DicePoolResult {
            pool_size,
            total_successes,
            total_botches,
            net_successes: total_successes.saturating_sub(total_botches),
        }
    }

    /// Build a result by classifying individual d10 faces
    pub fn from_faces(faces: &[u32]) -> Self {
        let successes = faces.iter().filter(|&&f| f >= SUCCESS_FACE).count() as u32;
        let botches = faces.iter().filter(|&&f| f == BOTCH_FACE).count() as u32;
        Self::new(faces.len() as u32, successes, botches)
    }
}

/// Source of randomness for every check in the economy
pub trait DiceOracle {
    /// Roll `pool_size` d10s
    fn roll_pool(&mut self, pool_size: u32) -> DicePoolResult;

    /// Roll a single die with `sides` faces, returning 1..=sides
    fn roll_die(&mut self, sides: u32) -> u32;

    fn d10(&mut self) -> u32 {
        self.roll_die(10)
    }

    fn d100(&mut self) -> u32 {
        self.roll_die(100)
    }
}

impl<D: DiceOracle + ?Sized> DiceOracle for &mut D {
    fn roll_pool(&mut self, pool_size: u32) -> DicePoolResult {
        (**self).roll_pool(pool_size)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}
