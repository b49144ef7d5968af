//! `rand`-backed dice oracle

use super::{DiceOracle, DicePoolResult, POOL_DIE_SIDES};
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dice oracle over any `rand` RNG
#[derive(Debug, Clone)]
pub struct RngDice<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        RngDice { rng }
    }
}

impl RngDice<ThreadRng> {
    /// Dice backed by the thread-local RNG
    pub fn thread() -> Self {
        RngDice::new(rand::thread_rng())
    }
}

impl RngDice<ChaCha8Rng> {
    /// Reproducible dice for replays and tests
    pub fn seeded(seed: u64) -> Self {
        RngDice::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> DiceOracle for RngDice<R> {
    fn roll_pool(&mut self, pool_size: u32) -> DicePoolResult {
        let faces: Vec<u32> = (0..pool_size)
            .map(|_| self.rng.gen_range(1..=POOL_DIE_SIDES))
            .collect();
        DicePoolResult::from_faces(&faces)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}
