//! Stress - 0-100 psychological strain with fixed threshold bands

pub mod resistance;
mod tracker;

pub use resistance::{resistance_check, ResistanceOutcome};
pub use tracker::{RecoveryResult, RestRecovery, StressApplication, StressTracker};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stress calculation constants
pub mod constants {
    /// Maximum stress (breaking point)
    pub const MAX_STRESS: u32 = 100;

    /// Each full band of this size costs one point of defense
    pub const DEFENSE_PENALTY_BAND: u32 = 20;

    /// At or above this, skill checks are made with disadvantage
    pub const SKILL_DISADVANTAGE_THRESHOLD: u32 = 80;

    /// Flat skill penalty applied while at or above the disadvantage threshold
    pub const SKILL_DISADVANTAGE_PENALTY: u32 = 2;
}

use constants::{DEFENSE_PENALTY_BAND, MAX_STRESS, SKILL_DISADVANTAGE_THRESHOLD};

/// Discrete stress band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressThreshold {
    /// 0-19
    Calm,
    /// 20-39
    Uneasy,
    /// 40-59
    Anxious,
    /// 60-79
    Panicked,
    /// 80-99
    Breaking,
    /// 100
    Trauma,
}

impl StressThreshold {
    /// Band for a stress value (values above 100 count as Trauma)
    pub fn from_value(stress: u32) -> Self {
        match stress {
            0..=19 => StressThreshold::Calm,
            20..=39 => StressThreshold::Uneasy,
            40..=59 => StressThreshold::Anxious,
            60..=79 => StressThreshold::Panicked,
            80..=99 => StressThreshold::Breaking,
            _ => StressThreshold::Trauma,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StressThreshold::Calm => "Calm",
            StressThreshold::Uneasy => "Uneasy",
            StressThreshold::Anxious => "Anxious",
            StressThreshold::Panicked => "Panicked",
            StressThreshold::Breaking => "Breaking",
            StressThreshold::Trauma => "Trauma",
        }
    }
}

impl fmt::Display for StressThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current stress of a character
///
/// Only the value is stored; the threshold is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StressState {
    current: u32,
}

impl StressState {
    /// Create a state, clamping to 0-100
    pub fn new(current: u32) -> Self {
        StressState {
            current: current.min(MAX_STRESS),
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn threshold(&self) -> StressThreshold {
        StressThreshold::from_value(self.current)
    }

    /// floor(stress / 20)
    pub fn defense_penalty(&self) -> u32 {
        self.current / DEFENSE_PENALTY_BAND
    }

    pub fn has_skill_disadvantage(&self) -> bool {
        self.current >= SKILL_DISADVANTAGE_THRESHOLD
    }

    pub fn requires_trauma_check(&self) -> bool {
        self.current >= MAX_STRESS
    }

    pub(crate) fn set(&mut self, value: u32) {
        self.current = value.min(MAX_STRESS);
    }
}
