//! Scripted dice for deterministic tests and replays

use super::{DiceOracle, DicePoolResult};
use std::collections::VecDeque;

/// Dice oracle that replays queued outcomes
///
/// Pool rolls consume queued net-success counts; single-die rolls consume
/// queued faces. An exhausted queue yields 0 net successes / a face of 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    pools: VecDeque<u32>,
    dies: VecDeque<u32>,
    pool_sizes_rolled: Vec<u32>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue net-success counts for upcoming pool rolls
    pub fn with_pools(mut self, net_successes: impl IntoIterator<Item = u32>) -> Self {
        self.pools.extend(net_successes);
        self
    }

    /// Queue faces for upcoming single-die rolls
    pub fn with_dies(mut self, faces: impl IntoIterator<Item = u32>) -> Self {
        self.dies.extend(faces);
        self
    }

    pub fn push_pool(&mut self, net_successes: u32) {
        self.pools.push_back(net_successes);
    }

    pub fn push_die(&mut self, face: u32) {
        self.dies.push_back(face);
    }

    /// Pool sizes requested so far, in order
    pub fn pool_sizes_rolled(&self) -> &[u32] {
        &self.pool_sizes_rolled
    }

    pub fn remaining_pools(&self) -> usize {
        self.pools.len()
    }

    pub fn remaining_dies(&self) -> usize {
        self.dies.len()
    }
}

impl DiceOracle for ScriptedDice {
    fn roll_pool(&mut self, pool_size: u32) -> DicePoolResult {
        self.pool_sizes_rolled.push(pool_size);
        let net = self.pools.pop_front().unwrap_or(0);
        DicePoolResult::new(pool_size, net, 0)
    }

    fn roll_die(&mut self, sides: u32) -> u32 {
        self.dies.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut dice = ScriptedDice::new().with_pools([2, 0]).with_dies([10, 3]);
        assert_eq!(dice.roll_pool(4).net_successes, 2);
        assert_eq!(dice.roll_pool(3).net_successes, 0);
        assert_eq!(dice.d10(), 10);
        assert_eq!(dice.d10(), 3);
        assert_eq!(dice.pool_sizes_rolled(), &[4, 3]);
    }

    #[test]
    fn test_exhausted_queue_defaults() {
        let mut dice = ScriptedDice::new();
        assert_eq!(dice.roll_pool(5).net_successes, 0);
        assert_eq!(dice.d100(), 1);
    }
}
