//! Corruption - 0-100 supernatural taint, orthogonal to stress
//!
//! Same shape as stress: a bounded value whose band is always derived.

use crate::character::Character;
use crate::config::CorruptionConstants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum corruption
pub const MAX_CORRUPTION: u32 = 100;

/// Discrete corruption band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptionThreshold {
    /// 0-19
    Untouched,
    /// 20-39
    Tainted,
    /// 40-59
    Afflicted,
    /// 60-79
    Corrupted,
    /// 80-99
    Consumed,
    /// 100
    Lost,
}

impl CorruptionThreshold {
    pub fn from_value(corruption: u32) -> Self {
        match corruption {
            0..=19 => CorruptionThreshold::Untouched,
            20..=39 => CorruptionThreshold::Tainted,
            40..=59 => CorruptionThreshold::Afflicted,
            60..=79 => CorruptionThreshold::Corrupted,
            80..=99 => CorruptionThreshold::Consumed,
            _ => CorruptionThreshold::Lost,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CorruptionThreshold::Untouched => "Untouched",
            CorruptionThreshold::Tainted => "Tainted",
            CorruptionThreshold::Afflicted => "Afflicted",
            CorruptionThreshold::Corrupted => "Corrupted",
            CorruptionThreshold::Consumed => "Consumed",
            CorruptionThreshold::Lost => "Lost",
        }
    }
}

impl fmt::Display for CorruptionThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current corruption of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorruptionState {
    current: u32,
}

impl CorruptionState {
    pub fn new(current: u32) -> Self {
        CorruptionState {
            current: current.min(MAX_CORRUPTION),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn threshold(&self) -> CorruptionThreshold {
        CorruptionThreshold::from_value(self.current)
    }

    /// floor(corruption / divisor)
    pub fn defense_penalty(&self, constants: &CorruptionConstants) -> u32 {
        self.current / constants.defense_penalty_divisor.max(1)
    }

    pub fn is_lost(&self) -> bool {
        self.current >= MAX_CORRUPTION
    }

    pub(crate) fn set(&mut self, value: u32) {
        self.current = value.min(MAX_CORRUPTION);
    }
}

/// Result of a corruption mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionChange {
    pub source: String,
    pub previous: u32,
    pub current: u32,
    pub threshold_before: CorruptionThreshold,
    pub threshold_after: CorruptionThreshold,
    pub threshold_crossed: bool,
}

/// Stateless processor for corruption mutation
#[derive(Debug, Clone, Copy, Default)]
pub struct CorruptionTracker;

impl CorruptionTracker {
    pub fn new() -> Self {
        CorruptionTracker
    }

    /// Add corruption, clamping at 100
    pub fn apply_corruption(
        &self,
        character: &mut Character,
        amount: u32,
        source: &str,
    ) -> CorruptionChange {
        let target = character.corruption().current().saturating_add(amount);
        self.set(character, target, source)
    }

    /// Remove corruption, flooring at 0
    pub fn purge_corruption(
        &self,
        character: &mut Character,
        amount: u32,
        source: &str,
    ) -> CorruptionChange {
        let target = character.corruption().current().saturating_sub(amount);
        self.set(character, target, source)
    }

    fn set(&self, character: &mut Character, target: u32, source: &str) -> CorruptionChange {
        let previous = character.corruption().current();
        let threshold_before = character.corruption().threshold();
        character.corruption_mut().set(target);
        let current = character.corruption().current();
        let threshold_after = character.corruption().threshold();

        tracing::debug!(character = %character.id, source, previous, current, "corruption changed");
        if threshold_before != threshold_after {
            tracing::info!(
                character = %character.id,
                from = %threshold_before,
                to = %threshold_after,
                "corruption threshold crossed"
            );
        }

        CorruptionChange {
            source: source.to_string(),
            previous,
            current,
            threshold_before,
            threshold_after,
            threshold_crossed: threshold_before != threshold_after,
        }
    }
}
