//! Trauma check - the seam through which traumas are decided

use super::{TraumaRegistry, TraumaTrigger};
use crate::character::Character;
use crate::config::TraumaCheckConstants;
use crate::dice::{DiceOracle, DicePoolResult};
use serde::{Deserialize, Serialize};

/// Outcome of a trauma check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaCheckResult {
    pub trigger: TraumaTrigger,
    pub passed: bool,
    /// ID of the trauma inflicted on failure, if any
    pub trauma_acquired: Option<String>,
    pub required_successes: u32,
    pub roll: Option<DicePoolResult>,
}

impl TraumaCheckResult {
    pub fn passed(trigger: TraumaTrigger) -> Self {
        TraumaCheckResult {
            trigger,
            passed: true,
            trauma_acquired: None,
            required_successes: 0,
            roll: None,
        }
    }

    pub fn failed(trigger: TraumaTrigger, trauma_id: impl Into<String>) -> Self {
        TraumaCheckResult {
            trigger,
            passed: false,
            trauma_acquired: Some(trauma_id.into()),
            required_successes: 0,
            roll: None,
        }
    }
}

/// Decide whether a character acquires a trauma
///
/// Implementations decide only; recording the trauma is the caller's job.
/// Any acquired trauma ID should name an entry of `registry`, the same
/// definitions the caller uses for HP penalties.
#[cfg_attr(test, mockall::automock)]
pub trait TraumaCheck {
    fn perform_trauma_check(
        &mut self,
        character: &Character,
        trigger: TraumaTrigger,
        registry: &TraumaRegistry,
    ) -> TraumaCheckResult;
}

/// Default trauma check: a WILL pool against a stress-scaled requirement
///
/// Required net successes = base + stress / stress_per_extra_success.
/// On failure a trauma is drawn from the registry entries for the trigger.
#[derive(Debug, Clone)]
pub struct WillTraumaCheck<D: DiceOracle> {
    dice: D,
    constants: TraumaCheckConstants,
}

impl<D: DiceOracle> WillTraumaCheck<D> {
    pub fn new(dice: D, constants: TraumaCheckConstants) -> Self {
        WillTraumaCheck { dice, constants }
    }

    pub fn with_defaults(dice: D) -> Self {
        Self::new(dice, TraumaCheckConstants::default())
    }

    pub fn required_successes(&self, stress: u32) -> u32 {
        let per_success = self.constants.stress_per_extra_success.max(1);
        self.constants.base_required_successes + stress / per_success
    }

    fn draw_trauma(&mut self, trigger: TraumaTrigger, registry: &TraumaRegistry) -> Option<String> {
        let mut candidates = registry.definitions_for(trigger);
        if candidates.is_empty() {
            candidates = registry.definitions.values().collect();
        }
        if candidates.is_empty() {
            return None;
        }
        let index = (self.dice.roll_die(candidates.len() as u32) as usize).saturating_sub(1);
        candidates.get(index).map(|d| d.id.clone())
    }
}

impl<D: DiceOracle> TraumaCheck for WillTraumaCheck<D> {
    fn perform_trauma_check(
        &mut self,
        character: &Character,
        trigger: TraumaTrigger,
        registry: &TraumaRegistry,
    ) -> TraumaCheckResult {
        let required = self.required_successes(character.stress().current());
        let roll = self.dice.roll_pool(character.will);
        let passed = roll.net_successes >= required;
        let trauma_acquired = if passed {
            None
        } else {
            self.draw_trauma(trigger, registry)
        };

        tracing::debug!(
            character = %character.id,
            %trigger,
            required,
            net_successes = roll.net_successes,
            passed,
            "trauma check"
        );

        TraumaCheckResult {
            trigger,
            passed,
            trauma_acquired,
            required_successes: required,
            roll: Some(roll),
        }
    }
}
