//! Specialization resources - one optional bounded resource per character
//!
//! Rage, Momentum and Coherence share the `DecayingResource` shape:
//! a 0-100 scalar, a per-turn decay, a rest reset rule and one overcharge
//! state. The variant is chosen when the character is created.

mod coherence;
mod momentum;
mod rage;

pub use coherence::{
    ApotheosisExit, ApotheosisUpkeep, CascadeResult, CoherenceState, CoherenceThreshold,
    CoherenceTracker, APOTHEOSIS_EXIT_REASON,
};
pub use momentum::{MomentumState, MomentumThreshold};
pub use rage::{RageState, RageThreshold};

use crate::config::{EconomyConstants, WarningConstants};
use crate::types::{ResourceChange, RestType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of every specialization resource
pub const MAX_RESOURCE: u32 = 100;

/// Which specialization resource a character carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecializationKind {
    Rage,
    Momentum,
    Coherence,
}

impl fmt::Display for SpecializationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecializationKind::Rage => "Rage",
            SpecializationKind::Momentum => "Momentum",
            SpecializationKind::Coherence => "Coherence",
        };
        f.write_str(name)
    }
}

/// A bounded scalar with per-turn decay and a rest rule
pub trait DecayingResource {
    fn kind(&self) -> SpecializationKind;

    fn current(&self) -> u32;

    /// Store a new value (implementations clamp to 0-100)
    fn set_current(&mut self, value: u32);

    fn decay_per_turn(&self, constants: &EconomyConstants) -> u32;

    /// Whether the resource is in its overcharge state
    fn is_overcharged(&self) -> bool;

    /// Value the resource is set to by a rest, if the rest touches it
    fn rest_target(&self, rest_type: RestType, constants: &EconomyConstants) -> Option<u32>;

    /// Add to the resource, clamping at the maximum
    fn gain(&mut self, amount: u32) -> ResourceChange {
        let previous = self.current();
        self.set_current(previous.saturating_add(amount).min(MAX_RESOURCE));
        ResourceChange::new(previous, self.current())
    }

    /// Remove from the resource, flooring at zero
    fn lose(&mut self, amount: u32) -> ResourceChange {
        let previous = self.current();
        self.set_current(previous.saturating_sub(amount));
        ResourceChange::new(previous, self.current())
    }

    /// Apply one turn of decay; `None` when there is nothing to decay
    fn decay(&mut self, constants: &EconomyConstants) -> Option<ResourceChange> {
        let amount = self.decay_per_turn(constants);
        if amount == 0 || self.current() == 0 {
            return None;
        }
        Some(self.lose(amount))
    }

    /// Apply the rest rule; `None` when the value is unchanged
    fn apply_rest(
        &mut self,
        rest_type: RestType,
        constants: &EconomyConstants,
    ) -> Option<ResourceChange> {
        let target = self.rest_target(rest_type, constants)?;
        let previous = self.current();
        if target == previous {
            return None;
        }
        self.set_current(target);
        Some(ResourceChange::new(previous, self.current()))
    }
}

/// The specialization resource attached to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecializationResource {
    Rage(RageState),
    Momentum(MomentumState),
    Coherence(CoherenceState),
}

impl SpecializationResource {
    pub fn rage(value: u32) -> Self {
        SpecializationResource::Rage(RageState::new(value))
    }

    pub fn momentum(value: u32) -> Self {
        SpecializationResource::Momentum(MomentumState::new(value))
    }

    pub fn coherence(value: u32) -> Self {
        SpecializationResource::Coherence(CoherenceState::new(value))
    }

    pub fn resource(&self) -> &dyn DecayingResource {
        match self {
            SpecializationResource::Rage(state) => state,
            SpecializationResource::Momentum(state) => state,
            SpecializationResource::Coherence(state) => state,
        }
    }

    pub fn resource_mut(&mut self) -> &mut dyn DecayingResource {
        match self {
            SpecializationResource::Rage(state) => state,
            SpecializationResource::Momentum(state) => state,
            SpecializationResource::Coherence(state) => state,
        }
    }

    pub fn kind(&self) -> SpecializationKind {
        self.resource().kind()
    }

    pub fn current(&self) -> u32 {
        self.resource().current()
    }

    pub fn as_rage(&self) -> Option<&RageState> {
        match self {
            SpecializationResource::Rage(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_coherence(&self) -> Option<&CoherenceState> {
        match self {
            SpecializationResource::Coherence(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_coherence_mut(&mut self) -> Option<&mut CoherenceState> {
        match self {
            SpecializationResource::Coherence(state) => Some(state),
            _ => None,
        }
    }

    /// Name of the current band
    pub fn threshold_name(&self) -> &'static str {
        match self {
            SpecializationResource::Rage(state) => state.threshold().name(),
            SpecializationResource::Momentum(state) => state.threshold().name(),
            SpecializationResource::Coherence(state) => state.threshold().name(),
        }
    }

    /// Warning message once the resource crosses its critical value
    pub fn warning(&self, constants: &WarningConstants) -> Option<String> {
        match self {
            SpecializationResource::Rage(state) if state.current() >= constants.rage_critical => {
                Some(format!("Rage at {}: on the edge of losing control", state.current()))
            }
            SpecializationResource::Momentum(state)
                if state.current() >= constants.momentum_critical =>
            {
                Some(format!("Momentum at {}: it will bleed away out of combat", state.current()))
            }
            SpecializationResource::Coherence(state)
                if state.current() <= constants.coherence_critical =>
            {
                Some(format!("Coherence at {}: spells risk cascading", state.current()))
            }
            SpecializationResource::Coherence(state) if state.in_apotheosis() => Some(format!(
                "Coherence at {}: Apotheosis drains stress every turn",
                state.current()
            )),
            _ => None,
        }
    }
}
