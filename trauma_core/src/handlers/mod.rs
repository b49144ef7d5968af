//! Unified handlers - the only paths through which damage, rest and turn
//! boundaries touch the economy
//!
//! Each handler is a stateless processor over `&EconomyConstants` that
//! mutates one character and returns an immutable result.

mod damage;
mod rest;
mod turn;

pub use damage::{DamageHandler, DamageIntegrationResult};
pub use rest::{RestHandler, RestIntegrationResult};
pub use turn::{TurnEndResult, TurnHandler, TurnStartResult};

use crate::types::CharacterId;
use serde::{Deserialize, Serialize};

/// Combat facts about one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DamageContext {
    /// Damage absorbed before conversion to stress
    pub soak: u32,
    pub is_critical_hit: bool,
    pub is_interrupt: bool,
    /// An ally died as part of this event
    pub ally_died: bool,
}

impl DamageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_soak(mut self, soak: u32) -> Self {
        self.soak = soak;
        self
    }

    pub fn critical(mut self) -> Self {
        self.is_critical_hit = true;
        self
    }

    pub fn interrupt(mut self) -> Self {
        self.is_interrupt = true;
        self
    }

    pub fn ally_died(mut self) -> Self {
        self.ally_died = true;
        self
    }
}

/// Who is resting alongside the character
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartyContext {
    /// Only checked against `berserker_ally`; when non-empty the ally must be
    /// listed. Members are never rested or otherwise changed by the rest.
    pub member_ids: Vec<CharacterId>,
    /// A Rage-bearing ally whose presence eases the party's stress
    pub berserker_ally: Option<CharacterId>,
}

impl PartyContext {
    /// Resting alone
    pub fn solo() -> Self {
        Self::default()
    }

    pub fn with_berserker(ally: CharacterId) -> Self {
        PartyContext {
            member_ids: vec![ally],
            berserker_ally: Some(ally),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnStartContext {
    pub in_combat: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnEndContext {
    /// Ambient dread this turn (capped, never resisted)
    pub environmental_stress: u32,
}
