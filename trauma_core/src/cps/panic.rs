//! Panic table - d10 rolled each turn while in Ruin Madness
//!
//! A 10 is a lucky break; every other face maps to a distinct effect.

use super::CpsStage;
use crate::dice::DiceOracle;
use serde::{Deserialize, Serialize};

/// Panic table result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanicEffect {
    /// 1: flee from the nearest threat
    Flee,
    /// 2: frozen in place, loses the action
    Paralyzed,
    /// 3: attacks the nearest creature, friend or foe
    LashOut,
    /// 4: babbles; cannot cast or speak commands
    Babbling,
    /// 5: drops whatever is held
    DropWeapon,
    /// 6: cowers; loses the action
    Cower,
    /// 7: claws at themselves
    SelfHarm,
    /// 8: screams, drawing every eye
    Scream,
    /// 9: hysterical laughter feeds the spiral
    Hysteria,
    /// 10: nothing happens
    LuckyBreak,
}

impl PanicEffect {
    /// Map a d10 face to an effect
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            1 => PanicEffect::Flee,
            2 => PanicEffect::Paralyzed,
            3 => PanicEffect::LashOut,
            4 => PanicEffect::Babbling,
            5 => PanicEffect::DropWeapon,
            6 => PanicEffect::Cower,
            7 => PanicEffect::SelfHarm,
            8 => PanicEffect::Scream,
            9 => PanicEffect::Hysteria,
            _ => PanicEffect::LuckyBreak,
        }
    }

    pub fn is_lucky_break(&self) -> bool {
        *self == PanicEffect::LuckyBreak
    }

    /// Whether the character loses their action this turn
    pub fn loses_action(&self) -> bool {
        matches!(
            self,
            PanicEffect::Flee | PanicEffect::Paralyzed | PanicEffect::Cower
        )
    }

    pub fn inflicts_self_damage(&self) -> bool {
        *self == PanicEffect::SelfHarm
    }

    pub fn inflicts_self_stress(&self) -> bool {
        *self == PanicEffect::Hysteria
    }

    pub fn description(&self) -> &'static str {
        match self {
            PanicEffect::Flee => "Overcome with terror, flees from the nearest threat",
            PanicEffect::Paralyzed => "Freezes in place, unable to act",
            PanicEffect::LashOut => "Lashes out at the nearest creature, friend or foe",
            PanicEffect::Babbling => "Babbles incoherently and cannot cast or give commands",
            PanicEffect::DropWeapon => "Hands shake loose; drops what they were holding",
            PanicEffect::Cower => "Cowers behind whatever cover is closest",
            PanicEffect::SelfHarm => "Claws at their own skin to make the visions stop",
            PanicEffect::Scream => "Screams, drawing every eye in the room",
            PanicEffect::Hysteria => "Laughs hysterically as the spiral tightens",
            PanicEffect::LuckyBreak => "Lucky break: the panic passes without effect",
        }
    }
}

/// A panic table roll and its effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanicRoll {
    pub roll: u32,
    pub effect: PanicEffect,
}

/// Roll the panic table
///
/// Returns `None` unless the stage is Ruin Madness.
pub fn roll_panic_table(stage: CpsStage, dice: &mut dyn DiceOracle) -> Option<PanicRoll> {
    if !stage.rolls_panic_table() {
        return None;
    }
    let roll = dice.d10();
    let effect = PanicEffect::from_roll(roll);
    tracing::debug!(roll, ?effect, "panic table rolled");
    Some(PanicRoll { roll, effect })
}
