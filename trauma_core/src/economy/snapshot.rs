//! TraumaEconomyState - read-only view of one character at one instant

use super::warnings::{
    active_warnings, total_defense_penalty, total_skill_penalty, warning_level, WarningLevel,
};
use crate::character::Character;
use crate::config::EconomyConstants;
use crate::corruption::CorruptionThreshold;
use crate::cps::CpsState;
use crate::specialization::SpecializationKind;
use crate::stress::StressThreshold;
use crate::trauma::{TraumaRecord, TraumaRegistry};
use crate::types::CharacterId;
use serde::{Deserialize, Serialize};

/// Specialization resource as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub kind: SpecializationKind,
    pub current: u32,
    pub threshold: String,
    pub overcharged: bool,
}

/// Complete economy state for display or hand-off
///
/// Built fresh on every query; never a source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaEconomyState {
    pub character_id: CharacterId,
    pub name: String,

    // === Stress ===
    pub stress: u32,
    pub stress_threshold: StressThreshold,
    pub cps: CpsState,

    // === Corruption ===
    pub corruption: u32,
    pub corruption_threshold: CorruptionThreshold,

    // === Trauma ===
    pub traumas: Vec<TraumaRecord>,
    pub effective_max_hp: u32,
    pub current_hp: u32,

    pub resource: Option<ResourceSnapshot>,

    // === Derived ===
    pub defense_penalty: u32,
    pub skill_penalty: u32,
    pub warnings: Vec<String>,
    pub warning_level: WarningLevel,
}

impl TraumaEconomyState {
    pub fn from_character(
        character: &Character,
        constants: &EconomyConstants,
        registry: &TraumaRegistry,
    ) -> Self {
        let resource = character.specialization().map(|spec| ResourceSnapshot {
            kind: spec.kind(),
            current: spec.current(),
            threshold: spec.threshold_name().to_string(),
            overcharged: spec.resource().is_overcharged(),
        });

        TraumaEconomyState {
            character_id: character.id,
            name: character.name.clone(),
            stress: character.stress().current(),
            stress_threshold: character.stress().threshold(),
            cps: CpsState::derive(character.stress()),
            corruption: character.corruption().current(),
            corruption_threshold: character.corruption().threshold(),
            traumas: character.traumas().to_vec(),
            effective_max_hp: registry.effective_max_hp(character.base_max_hp, character.traumas()),
            current_hp: character.current_hp,
            resource,
            defense_penalty: total_defense_penalty(character, constants),
            skill_penalty: total_skill_penalty(character),
            warnings: active_warnings(character, constants),
            warning_level: warning_level(character, constants),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cps::CpsStage;
    use crate::specialization::SpecializationResource;
    use crate::trauma::TraumaTrigger;

    #[test]
    fn test_snapshot_derives_cps_from_stress() {
        let constants = EconomyConstants::default();
        let registry = TraumaRegistry::with_defaults();
        let character = Character::new("Ilse", 3, 40)
            .unwrap()
            .with_stress(45)
            .with_specialization(SpecializationResource::coherence(85));

        let state = TraumaEconomyState::from_character(&character, &constants, &registry);

        assert_eq!(state.stress_threshold, StressThreshold::Anxious);
        assert_eq!(state.cps.stage, CpsStage::GlimmerMadness);
        assert_eq!(state.cps.logic_disadvantage, 1);
        let resource = state.resource.unwrap();
        assert_eq!(resource.kind, SpecializationKind::Coherence);
        assert!(resource.overcharged);
    }

    #[test]
    fn test_snapshot_applies_trauma_penalties() {
        let constants = EconomyConstants::default();
        let registry = TraumaRegistry::with_defaults();
        let mut character = Character::new("Ilse", 3, 40).unwrap();
        crate::trauma::record_trauma(&mut character, "tremors", TraumaTrigger::WitnessedHorror);

        let state = TraumaEconomyState::from_character(&character, &constants, &registry);
        assert_eq!(state.effective_max_hp, 36);
        assert_eq!(state.traumas.len(), 1);
    }

    #[test]
    fn test_to_json() {
        let constants = EconomyConstants::default();
        let registry = TraumaRegistry::new();
        let character = Character::new("Ilse", 3, 40).unwrap().with_stress(25);

        let json = TraumaEconomyState::from_character(&character, &constants, &registry)
            .to_json()
            .unwrap();
        assert!(json.contains("\"stress\": 25"));
        assert!(json.contains("\"stress_threshold\": \"uneasy\""));
    }
}
