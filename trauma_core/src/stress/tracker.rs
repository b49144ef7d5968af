//! Stress tracker - applies and recovers stress on a character

use super::resistance::{resistance_check, ResistanceOutcome};
use super::StressThreshold;
use crate::character::Character;
use crate::config::EconomyConstants;
use crate::dice::DiceOracle;
use crate::types::RestType;
use serde::{Deserialize, Serialize};

/// Result of adding stress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressApplication {
    /// What caused the stress (for audit/narrative)
    pub source: String,
    /// Stress requested before resistance
    pub base_amount: u32,
    /// Stress added after resistance (before clamping)
    pub applied_amount: u32,
    pub previous: u32,
    pub current: u32,
    pub threshold_before: StressThreshold,
    pub threshold_after: StressThreshold,
    pub threshold_crossed: bool,
    /// Present when a resistance check was rolled
    pub resistance: Option<ResistanceOutcome>,
    /// True when stress reached the breaking point (100)
    pub trauma_check_triggered: bool,
}

impl StressApplication {
    /// Stress actually gained after clamping
    pub fn stress_gained(&self) -> u32 {
        self.current.saturating_sub(self.previous)
    }
}

/// How much stress a recovery removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestRecovery {
    Amount(u32),
    /// Stress is set to zero whatever its current value
    FullReset,
}

/// Result of recovering stress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryResult {
    pub source: String,
    pub requested: RestRecovery,
    pub previous: u32,
    pub current: u32,
    pub threshold_before: StressThreshold,
    pub threshold_after: StressThreshold,
    pub threshold_crossed: bool,
}

impl RecoveryResult {
    pub fn recovered(&self) -> u32 {
        self.previous.saturating_sub(self.current)
    }
}

/// Stateless processor for stress mutation
#[derive(Debug, Clone, Copy)]
pub struct StressTracker<'a> {
    constants: &'a EconomyConstants,
}

impl<'a> StressTracker<'a> {
    pub fn new(constants: &'a EconomyConstants) -> Self {
        StressTracker { constants }
    }

    /// Add stress, optionally after a WILL resistance check
    ///
    /// A `resist_dc` of 0 skips the check.
    pub fn apply_stress(
        &self,
        character: &mut Character,
        amount: u32,
        source: &str,
        resist_dc: u32,
        dice: &mut dyn DiceOracle,
    ) -> StressApplication {
        let resistance = if resist_dc > 0 && amount > 0 {
            Some(resistance_check(
                character.will,
                amount,
                resist_dc,
                &self.constants.resistance,
                dice,
            ))
        } else {
            None
        };
        let applied_amount = resistance.map_or(amount, |r| r.final_amount);

        let previous = character.stress().current();
        let threshold_before = character.stress().threshold();
        character.stress_mut().set(previous.saturating_add(applied_amount));
        let current = character.stress().current();
        let threshold_after = character.stress().threshold();

        tracing::debug!(
            character = %character.id,
            source,
            base_amount = amount,
            applied_amount,
            previous,
            current,
            "stress applied"
        );
        if threshold_after != threshold_before {
            tracing::info!(
                character = %character.id,
                from = %threshold_before,
                to = %threshold_after,
                "stress threshold crossed"
            );
        }

        StressApplication {
            source: source.to_string(),
            base_amount: amount,
            applied_amount,
            previous,
            current,
            threshold_before,
            threshold_after,
            threshold_crossed: threshold_before != threshold_after,
            resistance,
            trauma_check_triggered: character.stress().requires_trauma_check(),
        }
    }

    /// Recovery granted by a rest type, before any party bonus
    ///
    /// - Short: WILL × 2
    /// - Long: WILL × 5
    /// - Sanctuary: full reset
    /// - Milestone: fixed 25
    pub fn rest_recovery(&self, rest_type: RestType, will: u32) -> RestRecovery {
        let rest = &self.constants.rest;
        match rest_type {
            RestType::Short => {
                RestRecovery::Amount(will.saturating_mul(rest.short_will_multiplier))
            }
            RestType::Long => RestRecovery::Amount(will.saturating_mul(rest.long_will_multiplier)),
            RestType::Sanctuary => RestRecovery::FullReset,
            RestType::Milestone => RestRecovery::Amount(rest.milestone_recovery),
        }
    }

    /// Recover stress according to the rest-type table
    pub fn recover_stress(&self, character: &mut Character, rest_type: RestType) -> RecoveryResult {
        let recovery = self.rest_recovery(rest_type, character.will);
        self.recover(character, recovery, rest_type.name())
    }

    /// Recover a named amount outside the rest table (quest rewards, etc.)
    pub fn recover_stress_amount(
        &self,
        character: &mut Character,
        amount: u32,
        source: &str,
    ) -> RecoveryResult {
        self.recover(character, RestRecovery::Amount(amount), source)
    }

    /// Recover stress, flooring at zero
    pub fn recover(
        &self,
        character: &mut Character,
        recovery: RestRecovery,
        source: &str,
    ) -> RecoveryResult {
        let previous = character.stress().current();
        let threshold_before = character.stress().threshold();
        let new_value = match recovery {
            RestRecovery::Amount(amount) => previous.saturating_sub(amount),
            RestRecovery::FullReset => 0,
        };
        character.stress_mut().set(new_value);
        let threshold_after = character.stress().threshold();

        tracing::debug!(
            character = %character.id,
            source,
            previous,
            current = new_value,
            "stress recovered"
        );

        RecoveryResult {
            source: source.to_string(),
            requested: recovery,
            previous,
            current: new_value,
            threshold_before,
            threshold_after,
            threshold_crossed: threshold_before != threshold_after,
        }
    }

    /// Hard-set stress after a trauma check at the breaking point
    ///
    /// A pass leaves 75, a failure 50; neither is a full reset.
    pub fn reset_after_trauma_check(
        &self,
        character: &mut Character,
        passed: bool,
    ) -> RecoveryResult {
        let previous = character.stress().current();
        let threshold_before = character.stress().threshold();
        let target = if passed {
            self.constants.trauma_check.passed_stress_reset
        } else {
            self.constants.trauma_check.failed_stress_reset
        };
        character.stress_mut().set(target);
        let threshold_after = character.stress().threshold();

        tracing::info!(
            character = %character.id,
            passed,
            previous,
            current = target,
            "stress reset after trauma check"
        );

        RecoveryResult {
            source: "trauma check".to_string(),
            requested: RestRecovery::Amount(previous.saturating_sub(target)),
            previous,
            current: character.stress().current(),
            threshold_before,
            threshold_after,
            threshold_crossed: threshold_before != threshold_after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn make_character(stress: u32, will: u32) -> Character {
        Character::new("Tester", will, 30).unwrap().with_stress(stress)
    }

    #[test]
    fn test_apply_without_resistance() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(10, 3);
        let mut dice = ScriptedDice::new();

        let result = tracker.apply_stress(&mut character, 15, "horror", 0, &mut dice);

        assert_eq!(result.previous, 10);
        assert_eq!(result.current, 25);
        assert!(result.resistance.is_none());
        assert!(result.threshold_crossed);
        assert_eq!(result.threshold_after, StressThreshold::Uneasy);
        assert!(dice.pool_sizes_rolled().is_empty());
    }

    #[test]
    fn test_apply_with_resistance_scenario() {
        // Stress 30, WILL 3, raw 20, DC 10, 2 net successes -> 75% -> +5
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(30, 3);
        let mut dice = ScriptedDice::new().with_pools([2]);

        let result = tracker.apply_stress(&mut character, 20, "claw", 10, &mut dice);

        assert_eq!(result.applied_amount, 5);
        assert_eq!(result.current, 35);
        assert_eq!(result.threshold_after, StressThreshold::Uneasy);
        assert!(!result.threshold_crossed);
        assert!(!result.trauma_check_triggered);
    }

    #[test]
    fn test_apply_clamps_and_triggers_trauma_check() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(92, 3);
        let mut dice = ScriptedDice::new();

        let result = tracker.apply_stress(&mut character, 30, "abyss", 0, &mut dice);

        assert_eq!(result.current, 100);
        assert_eq!(result.stress_gained(), 8);
        assert!(result.trauma_check_triggered);
    }

    #[test]
    fn test_exactly_99_does_not_trigger() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(90, 3);
        let mut dice = ScriptedDice::new();

        let result = tracker.apply_stress(&mut character, 9, "dread", 0, &mut dice);
        assert_eq!(result.current, 99);
        assert!(!result.trauma_check_triggered);
    }

    #[test]
    fn test_rest_recovery_table() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        assert_eq!(tracker.rest_recovery(RestType::Short, 4), RestRecovery::Amount(8));
        assert_eq!(tracker.rest_recovery(RestType::Long, 4), RestRecovery::Amount(20));
        assert_eq!(tracker.rest_recovery(RestType::Sanctuary, 4), RestRecovery::FullReset);
        assert_eq!(tracker.rest_recovery(RestType::Milestone, 4), RestRecovery::Amount(25));
    }

    #[test]
    fn test_recover_floors_at_zero() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(6, 4);

        let result = tracker.recover_stress(&mut character, RestType::Long);
        assert_eq!(result.current, 0);
        assert_eq!(result.recovered(), 6);
    }

    #[test]
    fn test_sanctuary_resets_from_zero() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(0, 2);

        let result = tracker.recover_stress(&mut character, RestType::Sanctuary);
        assert_eq!(result.current, 0);
        assert!(!result.threshold_crossed);
    }

    #[test]
    fn test_named_recovery() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);
        let mut character = make_character(50, 2);

        let result = tracker.recover_stress_amount(&mut character, 12, "quest reward");
        assert_eq!(result.current, 38);
        assert_eq!(result.source, "quest reward");
    }

    #[test]
    fn test_reset_after_trauma_check() {
        let constants = EconomyConstants::default();
        let tracker = StressTracker::new(&constants);

        let mut passed = make_character(100, 2);
        tracker.reset_after_trauma_check(&mut passed, true);
        assert_eq!(passed.stress().current(), 75);

        let mut failed = make_character(100, 2);
        let result = tracker.reset_after_trauma_check(&mut failed, false);
        assert_eq!(failed.stress().current(), 50);
        assert_eq!(result.recovered(), 50);
    }
}
