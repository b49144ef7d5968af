//! Rest handler - recovery, resource resets and the prolonged-exposure check

use crate::character::Character;
use crate::config::EconomyConstants;
use crate::cps::CpsStage;
use crate::specialization::{DecayingResource, SpecializationKind};
use crate::stress::{RecoveryResult, RestRecovery, StressTracker};
use crate::trauma::{
    record_trauma, TraumaCheck, TraumaCheckResult, TraumaRecord, TraumaRegistry, TraumaTrigger,
};
use crate::types::{ResourceChange, RestType};
use serde::{Deserialize, Serialize};

/// Result of one rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestIntegrationResult {
    pub rest_type: RestType,

    // === Stress ===
    pub stress: RecoveryResult,
    /// Extra recovery granted by a Berserker ally
    pub party_bonus: u32,

    // === Specialization ===
    pub resource_kind: Option<SpecializationKind>,
    pub resource: Option<ResourceChange>,

    // === Trauma ===
    pub trauma_check: Option<TraumaCheckResult>,
    pub trauma_recorded: Option<TraumaRecord>,

    // === Collapse stage ===
    pub cps_before: CpsStage,
    pub cps_after: CpsStage,
    pub cps_stage_changed: bool,

    /// Human-readable summary lines, in order
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RestHandler<'a> {
    constants: &'a EconomyConstants,
}

impl<'a> RestHandler<'a> {
    pub fn new(constants: &'a EconomyConstants) -> Self {
        RestHandler { constants }
    }

    /// Recovery bonus an ally grants on this rest
    ///
    /// Only Rage-bearing allies count, and only on Long/Sanctuary rests.
    pub fn party_bonus(&self, rest_type: RestType, berserker_ally: Option<&Character>) -> u32 {
        if !rest_type.is_extended() {
            return 0;
        }
        berserker_ally
            .and_then(|ally| ally.specialization())
            .and_then(|resource| resource.as_rage())
            .map_or(0, |rage| rage.party_stress_reduction(self.constants))
    }

    pub fn process_rest(
        &self,
        character: &mut Character,
        rest_type: RestType,
        berserker_ally: Option<&Character>,
        trauma_check: &mut dyn TraumaCheck,
        registry: &TraumaRegistry,
    ) -> RestIntegrationResult {
        let mut messages = Vec::new();
        let cps_before = CpsStage::from_stress(character.stress().current());
        let stress_tracker = StressTracker::new(self.constants);

        // 1. Stress recovery
        let base = stress_tracker.rest_recovery(rest_type, character.will);
        let (recovery, party_bonus) = match base {
            RestRecovery::Amount(amount) => {
                let bonus = self.party_bonus(rest_type, berserker_ally);
                (RestRecovery::Amount(amount.saturating_add(bonus)), bonus)
            }
            RestRecovery::FullReset => (RestRecovery::FullReset, 0),
        };
        let stress = stress_tracker.recover(character, recovery, rest_type.name());
        messages.push(format!(
            "{}: stress {} -> {}",
            capitalize(rest_type.name()),
            stress.previous,
            stress.current
        ));
        if party_bonus > 0 {
            messages.push(format!("A berserker ally eased {} more stress", party_bonus));
        }

        // 2. Specialization reset
        let mut resource_kind = None;
        let mut resource = None;
        if let Some(spec) = character.specialization_mut() {
            let state = spec.resource_mut();
            resource_kind = Some(state.kind());
            resource = state.apply_rest(rest_type, self.constants);
        }
        if let (Some(kind), Some(change)) = (resource_kind, resource) {
            messages.push(format!("{} {} -> {}", kind, change.previous, change.current));
        }

        // 3. Prolonged exposure
        let mut trauma_recorded = None;
        let trauma_result = if rest_type.is_extended() {
            let result = trauma_check.perform_trauma_check(
                character,
                TraumaTrigger::ProlongedExposure,
                registry,
            );
            match (&result.trauma_acquired, result.passed) {
                (Some(trauma_id), false) => {
                    messages.push(format!("Failed trauma check: acquired {}", trauma_id));
                    trauma_recorded = Some(record_trauma(character, trauma_id, result.trigger));
                }
                (_, false) => messages.push("Failed trauma check".to_string()),
                (_, true) => messages.push("Passed trauma check".to_string()),
            }
            Some(result)
        } else {
            None
        };

        // 4. Collapse stage
        let cps_after = CpsStage::from_stress(character.stress().current());
        let cps_stage_changed = cps_before != cps_after;
        if cps_stage_changed {
            messages.push(format!("Collapse stage: {} -> {}", cps_before, cps_after));
        }

        tracing::info!(
            character = %character.id,
            rest = rest_type.name(),
            stress = stress.current,
            party_bonus,
            %cps_after,
            "rest processed"
        );

        RestIntegrationResult {
            rest_type,
            stress,
            party_bonus,
            resource_kind,
            resource,
            trauma_check: trauma_result,
            trauma_recorded,
            cps_before,
            cps_after,
            cps_stage_changed,
            messages,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
