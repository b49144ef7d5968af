//! Turn handler - upkeep at the start and end of a character's turn

use super::{TurnEndContext, TurnStartContext};
use crate::character::Character;
use crate::config::EconomyConstants;
use crate::cps::{cosmetic_effects, roll_panic_table, CpsStage, PanicRoll};
use crate::dice::DiceOracle;
use crate::specialization::{ApotheosisUpkeep, CoherenceTracker, DecayingResource};
use crate::stress::{StressApplication, StressTracker};
use crate::types::ResourceChange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnStartResult {
    /// Out-of-combat decay of the specialization resource
    pub resource_decay: Option<ResourceChange>,
    pub apotheosis: Option<ApotheosisUpkeep>,
    /// Apotheosis must end; the host calls `exit_apotheosis`
    pub exit_required: bool,
    pub exit_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEndResult {
    pub stage: CpsStage,

    // === Panic ===
    pub panic: Option<PanicRoll>,
    pub panic_self_damage: u32,
    pub panic_stress: Option<StressApplication>,
    pub action_lost: bool,

    pub cosmetic_effects: Vec<String>,
    pub environmental_stress: Option<StressApplication>,

    /// Stress sits at the breaking point; detection only
    pub trauma_check_required: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TurnHandler<'a> {
    constants: &'a EconomyConstants,
}

impl<'a> TurnHandler<'a> {
    pub fn new(constants: &'a EconomyConstants) -> Self {
        TurnHandler { constants }
    }

    pub fn process_turn_start(
        &self,
        character: &mut Character,
        context: &TurnStartContext,
        dice: &mut dyn DiceOracle,
    ) -> TurnStartResult {
        let mut result = TurnStartResult::default();

        if !context.in_combat {
            result.resource_decay = character
                .specialization_mut()
                .and_then(|spec| spec.resource_mut().decay(self.constants));
        }

        let upkeep = CoherenceTracker::new(self.constants).update_apotheosis(character, dice);
        if let Some(upkeep) = upkeep {
            result.exit_required = upkeep.exit_required;
            result.exit_reason = upkeep.exit_reason.clone();
            result.apotheosis = Some(upkeep);
        }

        result
    }

    pub fn process_turn_end(
        &self,
        character: &mut Character,
        context: &TurnEndContext,
        dice: &mut dyn DiceOracle,
    ) -> TurnEndResult {
        let stage = CpsStage::from_stress(character.stress().current());
        let stress_tracker = StressTracker::new(self.constants);

        let panic = roll_panic_table(stage, dice);
        let mut panic_self_damage = 0;
        let mut panic_stress = None;
        let mut action_lost = false;
        if let Some(roll) = panic.filter(|roll| !roll.effect.is_lucky_break()) {
            action_lost = roll.effect.loses_action();
            if roll.effect.inflicts_self_damage() {
                panic_self_damage = character.take_damage(self.constants.turn.panic_self_damage);
            }
            if roll.effect.inflicts_self_stress() {
                panic_stress = Some(stress_tracker.apply_stress(
                    character,
                    self.constants.turn.panic_stress,
                    "panic",
                    0,
                    dice,
                ));
            }
            tracing::info!(
                character = %character.id,
                roll = roll.roll,
                effect = ?roll.effect,
                "panic"
            );
        }

        let environmental = context
            .environmental_stress
            .min(self.constants.turn.environmental_stress_cap);
        let environmental_stress = (environmental > 0)
            .then(|| stress_tracker.apply_stress(character, environmental, "environment", 0, dice));

        TurnEndResult {
            stage,
            panic,
            panic_self_damage,
            panic_stress,
            action_lost,
            cosmetic_effects: cosmetic_effects(stage).iter().map(|s| s.to_string()).collect(),
            environmental_stress,
            trauma_check_required: character.stress().requires_trauma_check(),
        }
    }
}
