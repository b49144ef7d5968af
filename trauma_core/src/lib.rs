//! trauma_core - Psychological resource engine for game characters
//!
//! This library provides:
//! - Stress / Corruption trackers with threshold bands and resistance checks
//! - Collapse stage (CPS) derivation and the panic table
//! - Trauma records, definitions and trauma checks
//! - Specialization resources (Rage, Momentum, Coherence)
//! - Damage / Rest / Turn handlers and the `TraumaEconomy` orchestrator

pub mod character;
pub mod config;
pub mod corruption;
pub mod cps;
pub mod dice;
pub mod economy;
pub mod error;
pub mod handlers;
pub mod prelude;
pub mod specialization;
pub mod stress;
pub mod trauma;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, CharacterRepository, InMemoryCharacterRepository, RepositoryError};
pub use config::EconomyConstants;
pub use corruption::{CorruptionState, CorruptionThreshold, CorruptionTracker};
pub use cps::{CpsStage, CpsState, PanicEffect};
pub use dice::{DiceOracle, DicePoolResult, RngDice, ScriptedDice};
pub use economy::{TraumaCheckOutcome, TraumaEconomy, TraumaEconomyState, WarningLevel};
pub use error::TraumaError;
pub use handlers::{
    DamageContext, DamageHandler, DamageIntegrationResult, PartyContext, RestHandler,
    RestIntegrationResult, TurnEndContext, TurnEndResult, TurnHandler, TurnStartContext,
    TurnStartResult,
};
pub use specialization::{
    CoherenceState, CoherenceTracker, DecayingResource, MomentumState, RageState,
    SpecializationKind, SpecializationResource,
};
pub use stress::{StressApplication, StressState, StressThreshold, StressTracker};
pub use trauma::{
    TraumaCheck, TraumaCheckResult, TraumaRecord, TraumaRegistry, TraumaTrigger, WillTraumaCheck,
};
pub use types::{ActionOutcome, CharacterId, PreconditionFailure, ResourceChange, RestType};
