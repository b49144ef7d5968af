//! Momentum - builds with aggression, bleeds away out of combat

use super::{DecayingResource, SpecializationKind, MAX_RESOURCE};
use crate::config::EconomyConstants;
use crate::types::RestType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumThreshold {
    /// 0-24
    Idle,
    /// 25-49
    Building,
    /// 50-79
    Surging,
    /// 80-100
    Unstoppable,
}

impl MomentumThreshold {
    pub fn from_value(momentum: u32) -> Self {
        match momentum {
            0..=24 => MomentumThreshold::Idle,
            25..=49 => MomentumThreshold::Building,
            50..=79 => MomentumThreshold::Surging,
            _ => MomentumThreshold::Unstoppable,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MomentumThreshold::Idle => "Idle",
            MomentumThreshold::Building => "Building",
            MomentumThreshold::Surging => "Surging",
            MomentumThreshold::Unstoppable => "Unstoppable",
        }
    }
}

impl fmt::Display for MomentumThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MomentumState {
    current: u32,
}

impl MomentumState {
    pub fn new(current: u32) -> Self {
        MomentumState {
            current: current.min(MAX_RESOURCE),
        }
    }

    pub fn threshold(&self) -> MomentumThreshold {
        MomentumThreshold::from_value(self.current)
    }
}

impl DecayingResource for MomentumState {
    fn kind(&self) -> SpecializationKind {
        SpecializationKind::Momentum
    }

    fn current(&self) -> u32 {
        self.current
    }

    fn set_current(&mut self, value: u32) {
        self.current = value.min(MAX_RESOURCE);
    }

    fn decay_per_turn(&self, constants: &EconomyConstants) -> u32 {
        constants.momentum.decay_per_turn
    }

    fn is_overcharged(&self) -> bool {
        self.threshold() == MomentumThreshold::Unstoppable
    }

    fn rest_target(&self, _rest_type: RestType, _constants: &EconomyConstants) -> Option<u32> {
        Some(0)
    }
}
