//! Rage - the Berserker's resource

use super::{DecayingResource, SpecializationKind, MAX_RESOURCE};
use crate::config::EconomyConstants;
use crate::types::RestType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rage band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RageThreshold {
    /// 0-24
    Calm,
    /// 25-49
    Angry,
    /// 50-79
    Furious,
    /// 80-100
    Berserk,
}

impl RageThreshold {
    pub fn from_value(rage: u32) -> Self {
        match rage {
            0..=24 => RageThreshold::Calm,
            25..=49 => RageThreshold::Angry,
            50..=79 => RageThreshold::Furious,
            _ => RageThreshold::Berserk,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RageThreshold::Calm => "Calm",
            RageThreshold::Angry => "Angry",
            RageThreshold::Furious => "Furious",
            RageThreshold::Berserk => "Berserk",
        }
    }
}

impl fmt::Display for RageThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RageState {
    current: u32,
}

impl RageState {
    pub fn new(current: u32) -> Self {
        RageState {
            current: current.min(MAX_RESOURCE),
        }
    }

    pub fn threshold(&self) -> RageThreshold {
        RageThreshold::from_value(self.current)
    }

    /// Stress an allied Berserker takes off the party on an extended rest
    pub fn party_stress_reduction(&self, constants: &EconomyConstants) -> u32 {
        constants.rage.party_stress_reduction
    }
}

impl DecayingResource for RageState {
    fn kind(&self) -> SpecializationKind {
        SpecializationKind::Rage
    }

    fn current(&self) -> u32 {
        self.current
    }

    fn set_current(&mut self, value: u32) {
        self.current = value.min(MAX_RESOURCE);
    }

    fn decay_per_turn(&self, constants: &EconomyConstants) -> u32 {
        constants.rage.decay_per_turn
    }

    fn is_overcharged(&self) -> bool {
        self.threshold() == RageThreshold::Berserk
    }

    fn rest_target(&self, _rest_type: RestType, _constants: &EconomyConstants) -> Option<u32> {
        Some(0)
    }
}
