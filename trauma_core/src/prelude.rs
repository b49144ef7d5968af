//! Prelude module for convenient imports
//!
//! ```rust
//! use trauma_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Character, CharacterRepository, InMemoryCharacterRepository};
pub use crate::types::{ActionOutcome, CharacterId, PreconditionFailure, ResourceChange, RestType};

// Trackers
pub use crate::corruption::{CorruptionState, CorruptionThreshold};
pub use crate::cps::{CpsStage, PanicEffect};
pub use crate::stress::{StressState, StressThreshold};

// Specialization
pub use crate::specialization::{
    CoherenceState, DecayingResource, MomentumState, RageState, SpecializationResource,
};

// Trauma
pub use crate::trauma::{TraumaCheck, TraumaRecord, TraumaRegistry, TraumaTrigger, WillTraumaCheck};

// Dice
pub use crate::dice::{DiceOracle, RngDice, ScriptedDice};

// Orchestration
pub use crate::economy::{TraumaEconomy, TraumaEconomyState, WarningLevel};
pub use crate::handlers::{DamageContext, PartyContext, TurnEndContext, TurnStartContext};

// Config / errors
pub use crate::config::EconomyConstants;
pub use crate::error::TraumaError;
