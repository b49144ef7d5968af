//! Warnings and derived penalties

use crate::character::Character;
use crate::config::EconomyConstants;
use crate::cps::CpsStage;
use crate::stress::constants::SKILL_DISADVANTAGE_PENALTY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall severity across all tracked values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningLevel {
    #[default]
    None,
    Elevated,
    Critical,
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningLevel::None => "None",
            WarningLevel::Elevated => "Elevated",
            WarningLevel::Critical => "Critical",
        };
        f.write_str(name)
    }
}

/// Stress defense penalty plus floor(corruption / divisor)
pub fn total_defense_penalty(character: &Character, constants: &EconomyConstants) -> u32 {
    character.stress().defense_penalty()
        + character.corruption().defense_penalty(&constants.corruption)
}

/// Flat stress disadvantage plus the collapse stage's logic penalty
pub fn total_skill_penalty(character: &Character) -> u32 {
    let stress_penalty = if character.stress().has_skill_disadvantage() {
        SKILL_DISADVANTAGE_PENALTY
    } else {
        0
    };
    stress_penalty + CpsStage::from_stress(character.stress().current()).logic_disadvantage()
}

pub fn warning_level(character: &Character, constants: &EconomyConstants) -> WarningLevel {
    let warnings = &constants.warnings;
    let stress = character.stress().current();
    let corruption = character.corruption().current();
    let resource_critical = character
        .specialization()
        .is_some_and(|spec| spec.warning(warnings).is_some());

    if stress >= warnings.stress_critical
        || corruption >= warnings.corruption_critical
        || resource_critical
    {
        WarningLevel::Critical
    } else if stress >= warnings.stress_elevated || corruption >= warnings.corruption_elevated {
        WarningLevel::Elevated
    } else {
        WarningLevel::None
    }
}

/// Human-readable warnings, most urgent first
pub fn active_warnings(character: &Character, constants: &EconomyConstants) -> Vec<String> {
    let warnings = &constants.warnings;
    let mut messages = Vec::new();

    let stress = character.stress();
    if stress.requires_trauma_check() {
        messages.push("Stress at breaking point: trauma check required".to_string());
    } else if stress.current() >= warnings.stress_critical {
        messages.push(format!("Stress critical ({}): {}", stress.current(), stress.threshold()));
    } else if stress.current() >= warnings.stress_elevated {
        messages.push(format!("Stress elevated ({}): {}", stress.current(), stress.threshold()));
    }

    let corruption = character.corruption();
    if corruption.is_lost() {
        messages.push("Corruption complete: the character is lost".to_string());
    } else if corruption.current() >= warnings.corruption_critical {
        messages.push(format!(
            "Corruption critical ({}): {}",
            corruption.current(),
            corruption.threshold()
        ));
    } else if corruption.current() >= warnings.corruption_elevated {
        messages.push(format!(
            "Corruption elevated ({}): {}",
            corruption.current(),
            corruption.threshold()
        ));
    }

    let stage = CpsStage::from_stress(stress.current());
    if stage.rolls_panic_table() {
        messages.push(format!("{}: panic table rolled every turn", stage));
    }

    if let Some(message) = character.specialization().and_then(|spec| spec.warning(warnings)) {
        messages.push(message);
    }

    messages
}
