//! Character - the entity that owns every trauma economy value

mod repository;

pub use repository::{CharacterRepository, InMemoryCharacterRepository, RepositoryError};

#[cfg(test)]
pub use repository::MockCharacterRepository;

use crate::corruption::CorruptionState;
use crate::error::TraumaError;
use crate::specialization::SpecializationResource;
use crate::stress::StressState;
use crate::trauma::TraumaRecord;
use crate::types::CharacterId;
use serde::{Deserialize, Serialize};

/// A character carrying stress, corruption, traumas and an optional
/// specialization resource
///
/// Stress and corruption are set at creation and afterwards only move
/// through the economy's trackers:
///
/// ```compile_fail
/// use trauma_core::{Character, StressState};
///
/// let mut character = Character::new("Aldo", 3, 30).unwrap();
/// character.stress = StressState::new(100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    // === Identity ===
    pub id: CharacterId,
    pub name: String,

    // === Attributes ===
    /// WILL sizes resistance pools and rest recovery
    pub will: u32,
    pub base_max_hp: u32,
    pub current_hp: u32,

    // === Economy ===
    /// Changed only by the stress tracker; read through `stress()`
    stress: StressState,
    corruption: CorruptionState,
    /// Append-only; read through `traumas()`
    #[serde(default)]
    traumas: Vec<TraumaRecord>,
    /// Chosen at creation, never swapped for another variant
    #[serde(default)]
    specialization: Option<SpecializationResource>,
}

impl Character {
    /// Create a character with zero stress and corruption
    pub fn new(name: impl Into<String>, will: u32, base_max_hp: u32) -> Result<Self, TraumaError> {
        if will == 0 {
            return Err(TraumaError::invalid_argument("WILL must be at least 1"));
        }
        if base_max_hp == 0 {
            return Err(TraumaError::invalid_argument("max HP must be at least 1"));
        }
        Ok(Character {
            id: CharacterId::new(),
            name: name.into(),
            will,
            base_max_hp,
            current_hp: base_max_hp,
            stress: StressState::default(),
            corruption: CorruptionState::default(),
            traumas: Vec::new(),
            specialization: None,
        })
    }

    /// Attach the specialization resource (builder, used at creation)
    pub fn with_specialization(mut self, resource: SpecializationResource) -> Self {
        self.specialization = Some(resource);
        self
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_stress(mut self, stress: u32) -> Self {
        self.stress = StressState::new(stress);
        self
    }

    pub fn with_corruption(mut self, corruption: u32) -> Self {
        self.corruption = CorruptionState::new(corruption);
        self
    }

    pub fn stress(&self) -> &StressState {
        &self.stress
    }

    pub(crate) fn stress_mut(&mut self) -> &mut StressState {
        &mut self.stress
    }

    pub fn corruption(&self) -> &CorruptionState {
        &self.corruption
    }

    pub(crate) fn corruption_mut(&mut self) -> &mut CorruptionState {
        &mut self.corruption
    }

    pub fn traumas(&self) -> &[TraumaRecord] {
        &self.traumas
    }

    pub(crate) fn push_trauma(&mut self, record: TraumaRecord) {
        self.traumas.push(record);
    }

    pub fn specialization(&self) -> Option<&SpecializationResource> {
        self.specialization.as_ref()
    }

    /// Mutable access to the attached resource's value (variant is fixed)
    pub fn specialization_mut(&mut self) -> Option<&mut SpecializationResource> {
        self.specialization.as_mut()
    }

    /// Lose HP, flooring at zero. Returns HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}
