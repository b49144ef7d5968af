//! Damage handler - converts combat damage into stress

use super::DamageContext;
use crate::character::Character;
use crate::config::EconomyConstants;
use crate::dice::DiceOracle;
use crate::stress::{StressApplication, StressTracker};
use serde::{Deserialize, Serialize};

/// Result of routing one hit through the economy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageIntegrationResult {
    // === Damage Breakdown ===
    pub raw_damage: u32,
    pub soak_applied: u32,
    pub residual_damage: u32,

    // === Stress ===
    /// Stress requested before resistance (damage share plus any ally-death bonus)
    pub stress_requested: u32,
    pub resist_dc: u32,
    pub stress: StressApplication,
    pub stress_gained: u32,

    // === Flags ===
    pub trauma_check_triggered: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct DamageHandler<'a> {
    constants: &'a EconomyConstants,
}

impl<'a> DamageHandler<'a> {
    pub fn new(constants: &'a EconomyConstants) -> Self {
        DamageHandler { constants }
    }

    /// Resistance DC for a hit
    ///
    /// Precedence: ally death > critical hit > interrupt > standard.
    pub fn resist_dc(&self, context: &DamageContext) -> u32 {
        let damage = &self.constants.damage;
        if context.ally_died {
            damage.ally_death_dc
        } else if context.is_critical_hit {
            damage.critical_hit_dc
        } else if context.is_interrupt {
            damage.interrupt_dc
        } else {
            damage.standard_dc
        }
    }

    /// Stress share of residual damage
    pub fn stress_from_damage(&self, residual_damage: u32) -> u32 {
        residual_damage.saturating_mul(self.constants.damage.stress_per_damage_percent) / 100
    }

    pub fn process_damage(
        &self,
        character: &mut Character,
        damage: u32,
        context: &DamageContext,
        dice: &mut dyn DiceOracle,
    ) -> DamageIntegrationResult {
        let soak_applied = context.soak.min(damage);
        let residual_damage = damage - soak_applied;

        let mut stress_requested = self.stress_from_damage(residual_damage);
        if context.ally_died {
            stress_requested =
                stress_requested.saturating_add(self.constants.damage.ally_death_stress);
        }
        let resist_dc = self.resist_dc(context);

        let stress = StressTracker::new(self.constants).apply_stress(
            character,
            stress_requested,
            "combat damage",
            resist_dc,
            dice,
        );

        tracing::debug!(
            character = %character.id,
            damage,
            soak = soak_applied,
            resist_dc,
            stress_gained = stress.stress_gained(),
            "damage processed"
        );

        DamageIntegrationResult {
            raw_damage: damage,
            soak_applied,
            residual_damage,
            stress_requested,
            resist_dc,
            stress_gained: stress.stress_gained(),
            trauma_check_triggered: stress.trauma_check_triggered,
            stress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn make_character(stress: u32, will: u32) -> Character {
        Character::new("Kaspar", will, 40).unwrap().with_stress(stress)
    }

    #[test]
    fn test_dc_precedence() {
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);

        assert_eq!(handler.resist_dc(&DamageContext::new()), 10);
        assert_eq!(handler.resist_dc(&DamageContext::new().interrupt()), 15);
        assert_eq!(handler.resist_dc(&DamageContext::new().interrupt().critical()), 20);
        assert_eq!(handler.resist_dc(&DamageContext::new().critical().ally_died()), 20);
    }

    #[test]
    fn test_standard_hit_scenario() {
        // 20 damage, WILL 3, 2 net successes -> 75% resisted -> +5
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(30, 3);
        let mut dice = ScriptedDice::new().with_pools([2]);

        let result = handler.process_damage(&mut character, 20, &DamageContext::new(), &mut dice);

        assert_eq!(result.resist_dc, 10);
        assert_eq!(result.stress_gained, 5);
        assert_eq!(character.stress().current(), 35);
        assert!(!result.trauma_check_triggered);
        assert_eq!(dice.pool_sizes_rolled(), &[3]);
    }

    #[test]
    fn test_soak_reduces_residual() {
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(0, 3);
        let mut dice = ScriptedDice::new().with_pools([0]);

        let context = DamageContext::new().with_soak(8);
        let result = handler.process_damage(&mut character, 12, &context, &mut dice);

        assert_eq!(result.soak_applied, 8);
        assert_eq!(result.residual_damage, 4);
        assert_eq!(character.stress().current(), 4);
    }

    #[test]
    fn test_full_soak_rolls_nothing() {
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(10, 3);
        let mut dice = ScriptedDice::new();

        let context = DamageContext::new().with_soak(50);
        let result = handler.process_damage(&mut character, 12, &context, &mut dice);

        assert_eq!(result.residual_damage, 0);
        assert_eq!(result.stress_gained, 0);
        assert!(dice.pool_sizes_rolled().is_empty());
    }

    #[test]
    fn test_critical_hit_shrinks_pool() {
        // DC 20 is two steps above base: WILL 4 rolls 2 dice
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(0, 4);
        let mut dice = ScriptedDice::new().with_pools([0]);

        handler.process_damage(&mut character, 10, &DamageContext::new().critical(), &mut dice);
        assert_eq!(dice.pool_sizes_rolled(), &[2]);
        assert_eq!(character.stress().current(), 10);
    }

    #[test]
    fn test_ally_death_adds_bonus_stress() {
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(0, 3);
        let mut dice = ScriptedDice::new().with_pools([0]);

        let context = DamageContext::new().ally_died();
        let result = handler.process_damage(&mut character, 0, &context, &mut dice);

        assert_eq!(result.stress_requested, 15);
        assert_eq!(result.resist_dc, 20);
        assert_eq!(character.stress().current(), 15);
    }

    #[test]
    fn test_breaking_point_flagged() {
        let constants = EconomyConstants::default();
        let handler = DamageHandler::new(&constants);
        let mut character = make_character(95, 1);
        let mut dice = ScriptedDice::new().with_pools([0]);

        let result = handler.process_damage(&mut character, 10, &DamageContext::new(), &mut dice);
        assert!(result.trauma_check_triggered);
        assert_eq!(character.stress().current(), 100);
    }
}
