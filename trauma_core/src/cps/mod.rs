//! CPS - Psychic collapse stage, derived purely from the stress threshold
//!
//! There is no stored stage and no mutator: the stage is recomputed from
//! stress every time it is read.

mod effects;
mod panic;

pub use effects::cosmetic_effects;
pub use panic::{roll_panic_table, PanicEffect, PanicRoll};

use crate::stress::{StressState, StressThreshold};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collapse stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CpsStage {
    None,
    WeightOfKnowing,
    GlimmerMadness,
    RuinMadness,
    HollowShell,
}

impl CpsStage {
    pub fn from_threshold(threshold: StressThreshold) -> Self {
        match threshold {
            StressThreshold::Calm => CpsStage::None,
            StressThreshold::Uneasy => CpsStage::WeightOfKnowing,
            StressThreshold::Anxious => CpsStage::GlimmerMadness,
            StressThreshold::Panicked => CpsStage::RuinMadness,
            StressThreshold::Breaking | StressThreshold::Trauma => CpsStage::HollowShell,
        }
    }

    pub fn from_stress(stress: u32) -> Self {
        Self::from_threshold(StressThreshold::from_value(stress))
    }

    /// Penalty to logic-based skill checks
    pub fn logic_disadvantage(&self) -> u32 {
        match self {
            CpsStage::None | CpsStage::WeightOfKnowing => 0,
            CpsStage::GlimmerMadness => 1,
            CpsStage::RuinMadness => 2,
            CpsStage::HollowShell => 3,
        }
    }

    /// Only Ruin Madness rolls on the panic table
    pub fn rolls_panic_table(&self) -> bool {
        *self == CpsStage::RuinMadness
    }

    pub fn name(&self) -> &'static str {
        match self {
            CpsStage::None => "None",
            CpsStage::WeightOfKnowing => "Weight of Knowing",
            CpsStage::GlimmerMadness => "Glimmer Madness",
            CpsStage::RuinMadness => "Ruin Madness",
            CpsStage::HollowShell => "Hollow Shell",
        }
    }
}

impl fmt::Display for CpsStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a character's collapse stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpsState {
    pub stage: CpsStage,
    pub logic_disadvantage: u32,
    pub cosmetic_effects: Vec<String>,
}

impl CpsState {
    /// Derive from a stress value
    pub fn derive(stress: &StressState) -> Self {
        let stage = CpsStage::from_threshold(stress.threshold());
        CpsState {
            stage,
            logic_disadvantage: stage.logic_disadvantage(),
            cosmetic_effects: cosmetic_effects(stage).iter().map(|s| s.to_string()).collect(),
        }
    }
}
