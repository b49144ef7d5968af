//! Coherence - the arcanist's resource
//!
//! Low Coherence risks spell cascades; high Coherence reaches Apotheosis,
//! which costs stress every turn until the character steps out of it.

use super::{DecayingResource, SpecializationKind, MAX_RESOURCE};
use crate::character::Character;
use crate::config::{CascadePenalties, EconomyConstants};
use crate::corruption::{CorruptionChange, CorruptionTracker};
use crate::dice::DiceOracle;
use crate::stress::{StressApplication, StressTracker};
use crate::types::{ActionOutcome, PreconditionFailure, ResourceChange, RestType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason reported when Apotheosis upkeep pushes stress to the breaking point
pub const APOTHEOSIS_EXIT_REASON: &str = "Stress reached critical level (100)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoherenceThreshold {
    /// 0-20
    Destabilized,
    /// 21-40
    Unstable,
    /// 41-80
    Balanced,
    /// 81-100
    Apotheosis,
}

impl CoherenceThreshold {
    pub fn from_value(coherence: u32) -> Self {
        match coherence {
            0..=20 => CoherenceThreshold::Destabilized,
            21..=40 => CoherenceThreshold::Unstable,
            41..=80 => CoherenceThreshold::Balanced,
            _ => CoherenceThreshold::Apotheosis,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoherenceThreshold::Destabilized => "Destabilized",
            CoherenceThreshold::Unstable => "Unstable",
            CoherenceThreshold::Balanced => "Balanced",
            CoherenceThreshold::Apotheosis => "Apotheosis",
        }
    }

    /// Percent chance (on 1d100) that a spell cascades in this band
    pub fn cascade_chance(&self, constants: &EconomyConstants) -> u32 {
        match self {
            CoherenceThreshold::Destabilized => constants.coherence.destabilized_cascade_chance,
            CoherenceThreshold::Unstable => constants.coherence.unstable_cascade_chance,
            CoherenceThreshold::Balanced | CoherenceThreshold::Apotheosis => 0,
        }
    }

    pub fn cascade_penalties<'c>(
        &self,
        constants: &'c EconomyConstants,
    ) -> Option<&'c CascadePenalties> {
        match self {
            CoherenceThreshold::Destabilized => Some(&constants.coherence.destabilized),
            CoherenceThreshold::Unstable => Some(&constants.coherence.unstable),
            CoherenceThreshold::Balanced | CoherenceThreshold::Apotheosis => None,
        }
    }
}

impl fmt::Display for CoherenceThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoherenceState {
    current: u32,
}

impl Default for CoherenceState {
    fn default() -> Self {
        CoherenceState { current: 50 }
    }
}

impl CoherenceState {
    pub fn new(current: u32) -> Self {
        CoherenceState {
            current: current.min(MAX_RESOURCE),
        }
    }

    pub fn threshold(&self) -> CoherenceThreshold {
        CoherenceThreshold::from_value(self.current)
    }

    pub fn in_apotheosis(&self) -> bool {
        self.threshold() == CoherenceThreshold::Apotheosis
    }
}

impl DecayingResource for CoherenceState {
    fn kind(&self) -> SpecializationKind {
        SpecializationKind::Coherence
    }

    fn current(&self) -> u32 {
        self.current
    }

    fn set_current(&mut self, value: u32) {
        self.current = value.min(MAX_RESOURCE);
    }

    fn decay_per_turn(&self, constants: &EconomyConstants) -> u32 {
        constants.coherence.decay_per_turn
    }

    fn is_overcharged(&self) -> bool {
        self.in_apotheosis()
    }

    /// Extended rests lift Coherence back to the restore target, never lower it
    fn rest_target(&self, rest_type: RestType, constants: &EconomyConstants) -> Option<u32> {
        let target = constants.rest.coherence_restore_target;
        if rest_type.is_extended() && self.current < target {
            Some(target)
        } else {
            None
        }
    }
}

/// Result of a cascade check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeResult {
    pub threshold: CoherenceThreshold,
    pub chance: u32,
    /// The 1d100 roll; absent when the band never cascades
    pub roll: Option<u32>,
    pub triggered: bool,
    pub coherence: ResourceChange,
    pub self_damage: u32,
    pub stress: Option<StressApplication>,
    pub corruption: Option<CorruptionChange>,
    pub spell_disrupted: bool,
}

/// Result of one turn of Apotheosis upkeep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApotheosisUpkeep {
    pub stress: StressApplication,
    /// Stress hit the breaking point; the host should call `exit_apotheosis`
    pub exit_required: bool,
    pub exit_reason: Option<String>,
}

/// Result of leaving Apotheosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApotheosisExit {
    pub coherence: ResourceChange,
    pub reason: String,
}

/// Stateless processor for Coherence operations
#[derive(Debug, Clone, Copy)]
pub struct CoherenceTracker<'a> {
    constants: &'a EconomyConstants,
}

impl<'a> CoherenceTracker<'a> {
    pub fn new(constants: &'a EconomyConstants) -> Self {
        CoherenceTracker { constants }
    }

    pub fn gain_coherence(
        &self,
        character: &mut Character,
        amount: u32,
    ) -> ActionOutcome<ResourceChange> {
        match coherence_mut(character) {
            Some(state) => ActionOutcome::Applied(state.gain(amount)),
            None => ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing),
        }
    }

    pub fn lose_coherence(
        &self,
        character: &mut Character,
        amount: u32,
    ) -> ActionOutcome<ResourceChange> {
        match coherence_mut(character) {
            Some(state) => ActionOutcome::Applied(state.lose(amount)),
            None => ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing),
        }
    }

    /// Roll for a spell cascade and apply the band's penalties on a hit
    pub fn check_cascade(
        &self,
        character: &mut Character,
        dice: &mut dyn DiceOracle,
    ) -> ActionOutcome<CascadeResult> {
        let Some(state) = coherence(character) else {
            return ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing);
        };
        let threshold = state.threshold();
        let chance = threshold.cascade_chance(self.constants);
        let unchanged = ResourceChange::new(state.current(), state.current());

        let (penalties, roll) = match threshold.cascade_penalties(self.constants) {
            Some(penalties) if chance > 0 => (penalties, dice.d100()),
            _ => {
                return ActionOutcome::Applied(CascadeResult {
                    threshold,
                    chance,
                    roll: None,
                    triggered: false,
                    coherence: unchanged,
                    self_damage: 0,
                    stress: None,
                    corruption: None,
                    spell_disrupted: false,
                });
            }
        };

        if roll > chance {
            tracing::debug!(character = %character.id, %threshold, roll, chance, "no cascade");
            return ActionOutcome::Applied(CascadeResult {
                threshold,
                chance,
                roll: Some(roll),
                triggered: false,
                coherence: unchanged,
                self_damage: 0,
                stress: None,
                corruption: None,
                spell_disrupted: false,
            });
        }

        let coherence = match coherence_mut(character) {
            Some(state) => state.lose(penalties.coherence_loss),
            None => unchanged,
        };
        let self_damage = character.take_damage(penalties.self_damage);
        // Cascade stress is never resisted
        let stress = StressTracker::new(self.constants).apply_stress(
            character,
            penalties.stress_gain,
            "spell cascade",
            0,
            dice,
        );
        let corruption = (penalties.corruption_gain > 0).then(|| {
            CorruptionTracker::new().apply_corruption(
                character,
                penalties.corruption_gain,
                "spell cascade",
            )
        });

        tracing::warn!(
            character = %character.id,
            %threshold,
            roll,
            chance,
            coherence_lost = penalties.coherence_loss,
            self_damage,
            "spell cascade"
        );

        ActionOutcome::Applied(CascadeResult {
            threshold,
            chance,
            roll: Some(roll),
            triggered: true,
            coherence,
            self_damage,
            stress: Some(stress),
            corruption,
            spell_disrupted: true,
        })
    }

    /// Apply one turn of Apotheosis stress; `None` outside Apotheosis
    ///
    /// Reports but never forces the exit.
    pub fn update_apotheosis(
        &self,
        character: &mut Character,
        dice: &mut dyn DiceOracle,
    ) -> Option<ApotheosisUpkeep> {
        if !coherence(character)?.in_apotheosis() {
            return None;
        }

        let stress = StressTracker::new(self.constants).apply_stress(
            character,
            self.constants.coherence.apotheosis_stress_cost,
            "apotheosis upkeep",
            0,
            dice,
        );
        let exit_required = character.stress().requires_trauma_check();

        tracing::info!(
            character = %character.id,
            stress = stress.current,
            exit_required,
            "apotheosis upkeep"
        );

        Some(ApotheosisUpkeep {
            stress,
            exit_required,
            exit_reason: exit_required.then(|| APOTHEOSIS_EXIT_REASON.to_string()),
        })
    }

    /// Leave Apotheosis, dropping Coherence to the post-Apotheosis value
    pub fn exit_apotheosis(
        &self,
        character: &mut Character,
        reason: &str,
    ) -> ActionOutcome<ApotheosisExit> {
        let target = self.constants.coherence.post_apotheosis_value;
        let id = character.id;
        let Some(state) = coherence_mut(character) else {
            return ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing);
        };
        if !state.in_apotheosis() {
            return ActionOutcome::Rejected(PreconditionFailure::NotInApotheosis);
        }

        let previous = state.current();
        state.set_current(target);
        let coherence = ResourceChange::new(previous, state.current());

        tracing::info!(
            character = %id,
            previous,
            current = coherence.current,
            reason,
            "apotheosis exited"
        );

        ActionOutcome::Applied(ApotheosisExit {
            coherence,
            reason: reason.to_string(),
        })
    }

    /// Out-of-combat meditation restores Coherence
    pub fn meditate(
        &self,
        character: &mut Character,
        in_combat: bool,
    ) -> ActionOutcome<ResourceChange> {
        let amount = self.constants.coherence.meditate_amount;
        let Some(state) = coherence_mut(character) else {
            return ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing);
        };
        if in_combat {
            return ActionOutcome::Rejected(PreconditionFailure::InCombat);
        }
        if state.current() >= MAX_RESOURCE {
            return ActionOutcome::Rejected(PreconditionFailure::AlreadyAtMaximum);
        }
        ActionOutcome::Applied(state.gain(amount))
    }
}

fn coherence(character: &Character) -> Option<CoherenceState> {
    character.specialization().and_then(|s| s.as_coherence()).copied()
}

fn coherence_mut(character: &mut Character) -> Option<&mut CoherenceState> {
    character.specialization_mut().and_then(|s| s.as_coherence_mut())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::specialization::SpecializationResource;

    fn arcanist(coherence: u32, stress: u32) -> Character {
        Character::new("Ilse", 3, 30)
            .unwrap()
            .with_stress(stress)
            .with_specialization(SpecializationResource::coherence(coherence))
    }

    fn coherence_of(character: &Character) -> u32 {
        character.specialization().unwrap().current()
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(CoherenceThreshold::from_value(20), CoherenceThreshold::Destabilized);
        assert_eq!(CoherenceThreshold::from_value(21), CoherenceThreshold::Unstable);
        assert_eq!(CoherenceThreshold::from_value(40), CoherenceThreshold::Unstable);
        assert_eq!(CoherenceThreshold::from_value(80), CoherenceThreshold::Balanced);
        assert_eq!(CoherenceThreshold::from_value(81), CoherenceThreshold::Apotheosis);
    }

    #[test]
    fn test_gain_lose_clamp() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(90, 0);

        let change = tracker.gain_coherence(&mut character, 30).applied().unwrap();
        assert_eq!(change.current, 100);
        let change = tracker.lose_coherence(&mut character, 130).applied().unwrap();
        assert_eq!(change.current, 0);
        assert_eq!(character.stress().current(), 0);
    }

    #[test]
    fn test_missing_specialization_rejected() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = Character::new("Bram", 3, 30).unwrap();

        let outcome = tracker.gain_coherence(&mut character, 5);
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::SpecializationMissing));
    }

    #[test]
    fn test_cascade_destabilized_hit() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(18, 10);
        let mut dice = ScriptedDice::new().with_dies([25]);

        let result = tracker.check_cascade(&mut character, &mut dice).applied().unwrap();

        assert!(result.triggered);
        assert!(result.spell_disrupted);
        assert_eq!(result.coherence.current, 3);
        assert_eq!(result.self_damage, 10);
        assert_eq!(character.current_hp, 20);
        assert_eq!(character.stress().current(), 20);
        assert_eq!(character.corruption().current(), 5);
    }

    #[test]
    fn test_cascade_unstable_miss() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(30, 10);
        let mut dice = ScriptedDice::new().with_dies([11]);

        let result = tracker.check_cascade(&mut character, &mut dice).applied().unwrap();

        assert!(!result.triggered);
        assert_eq!(result.roll, Some(11));
        assert_eq!(coherence_of(&character), 30);
        assert_eq!(character.stress().current(), 10);
    }

    #[test]
    fn test_cascade_unstable_hit_has_no_corruption() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(30, 0);
        let mut dice = ScriptedDice::new().with_dies([10]);

        let result = tracker.check_cascade(&mut character, &mut dice).applied().unwrap();
        assert!(result.triggered);
        assert!(result.corruption.is_none());
        assert_eq!(character.corruption().current(), 0);
    }

    #[test]
    fn test_balanced_never_rolls() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(60, 0);
        let mut dice = ScriptedDice::new().with_dies([1]);

        let result = tracker.check_cascade(&mut character, &mut dice).applied().unwrap();
        assert!(!result.triggered);
        assert!(result.roll.is_none());
        assert_eq!(dice.remaining_dies(), 1);
    }

    #[test]
    fn test_apotheosis_upkeep_reports_exit() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(90, 92);
        let mut dice = ScriptedDice::new();

        let upkeep = tracker.update_apotheosis(&mut character, &mut dice).unwrap();

        assert_eq!(upkeep.stress.current, 100);
        assert!(upkeep.exit_required);
        assert_eq!(upkeep.exit_reason.as_deref(), Some(APOTHEOSIS_EXIT_REASON));
        // Reported, not forced
        assert_eq!(coherence_of(&character), 90);
    }

    #[test]
    fn test_upkeep_outside_apotheosis() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);
        let mut character = arcanist(60, 20);
        let mut dice = ScriptedDice::new();

        assert!(tracker.update_apotheosis(&mut character, &mut dice).is_none());
        assert_eq!(character.stress().current(), 20);
    }

    #[test]
    fn test_exit_apotheosis() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);

        let mut character = arcanist(95, 100);
        let exit = tracker
            .exit_apotheosis(&mut character, APOTHEOSIS_EXIT_REASON)
            .applied()
            .unwrap();
        assert_eq!(exit.coherence, ResourceChange::new(95, 50));

        let outcome = tracker.exit_apotheosis(&mut character, "again");
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::NotInApotheosis));
    }

    #[test]
    fn test_meditate() {
        let constants = EconomyConstants::default();
        let tracker = CoherenceTracker::new(&constants);

        let mut character = arcanist(50, 0);
        assert_eq!(
            tracker.meditate(&mut character, true).rejection(),
            Some(PreconditionFailure::InCombat)
        );
        let change = tracker.meditate(&mut character, false).applied().unwrap();
        assert_eq!(change.current, 70);

        let mut full = arcanist(100, 0);
        assert_eq!(
            tracker.meditate(&mut full, false).rejection(),
            Some(PreconditionFailure::AlreadyAtMaximum)
        );

        let mut nearly = arcanist(95, 0);
        let change = tracker.meditate(&mut nearly, false).applied().unwrap();
        assert_eq!(change.current, 100);
    }

    #[test]
    fn test_rest_restores_only_when_below() {
        let constants = EconomyConstants::default();

        let mut low = CoherenceState::new(30);
        assert_eq!(low.apply_rest(RestType::Short, &constants), None);
        assert_eq!(low.apply_rest(RestType::Long, &constants), Some(ResourceChange::new(30, 50)));

        let mut high = CoherenceState::new(70);
        assert_eq!(high.apply_rest(RestType::Sanctuary, &constants), None);
        assert_eq!(high.current(), 70);
    }
}
