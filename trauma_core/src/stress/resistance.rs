//! Resistance check - WILL pool that reduces incoming stress
//!
//! Net successes map to a reduction tier:
//! - 0: no reduction
//! - 1: 50%
//! - 2-3: 75%
//! - 4+: 100%
//!
//! final_stress = round(base × (1 − reduction))

use crate::config::ResistanceConstants;
use crate::dice::{DiceOracle, DicePoolResult};
use serde::{Deserialize, Serialize};

/// Outcome of a resistance check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceOutcome {
    pub dc: u32,
    pub pool_size: u32,
    pub roll: DicePoolResult,
    /// Reduction applied, in percent
    pub reduction_percent: u32,
    pub base_amount: u32,
    pub final_amount: u32,
}

impl ResistanceOutcome {
    pub fn stress_prevented(&self) -> u32 {
        self.base_amount - self.final_amount
    }
}

/// Reduction percentage for a number of net successes
pub fn reduction_percent(net_successes: u32) -> u32 {
    match net_successes {
        0 => 0,
        1 => 50,
        2 | 3 => 75,
        _ => 100,
    }
}

/// Apply a percentage reduction with round-half-up
pub fn apply_reduction(base_amount: u32, reduction_percent: u32) -> u32 {
    let multiplier = 1.0 - (reduction_percent.min(100) as f64 / 100.0);
    (base_amount as f64 * multiplier).round() as u32
}

/// Dice pool for a WILL score against a DC
///
/// Each `dc_step` above the base DC removes one die; the pool never drops
/// below `min_pool`.
pub fn resistance_pool(will: u32, dc: u32, constants: &ResistanceConstants) -> u32 {
    let penalty = dc.saturating_sub(constants.base_dc) / constants.dc_step.max(1);
    will.saturating_sub(penalty).max(constants.min_pool)
}

/// Roll a resistance check and compute the reduced stress
pub fn resistance_check(
    will: u32,
    base_amount: u32,
    dc: u32,
    constants: &ResistanceConstants,
    dice: &mut dyn DiceOracle,
) -> ResistanceOutcome {
    let pool_size = resistance_pool(will, dc, constants);
    let roll = dice.roll_pool(pool_size);
    let reduction = reduction_percent(roll.net_successes);
    let final_amount = apply_reduction(base_amount, reduction);

    tracing::debug!(
        will,
        dc,
        pool_size,
        net_successes = roll.net_successes,
        reduction,
        base_amount,
        final_amount,
        "resistance check"
    );

    ResistanceOutcome {
        dc,
        pool_size,
        roll,
        reduction_percent: reduction,
        base_amount,
        final_amount,
    }
}
