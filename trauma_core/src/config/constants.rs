//! Economy constants configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable trauma economy constants
///
/// Threshold bands are fixed by the trackers; everything here is balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyConstants {
    #[serde(default)]
    pub resistance: ResistanceConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub rest: RestConstants,
    #[serde(default)]
    pub trauma_check: TraumaCheckConstants,
    #[serde(default)]
    pub corruption: CorruptionConstants,
    #[serde(default)]
    pub rage: RageConstants,
    #[serde(default)]
    pub momentum: MomentumConstants,
    #[serde(default)]
    pub coherence: CoherenceConstants,
    #[serde(default)]
    pub turn: TurnConstants,
    #[serde(default)]
    pub warnings: WarningConstants,
}

impl EconomyConstants {
    /// Check cross-field rules that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coherence = &self.coherence;
        if coherence.destabilized_cascade_chance > 100 || coherence.unstable_cascade_chance > 100 {
            return Err(ConfigError::ValidationError(
                "cascade chances must be percentages in 0..=100".to_string(),
            ));
        }
        if !coherence.destabilized.exceeds(&coherence.unstable) {
            return Err(ConfigError::ValidationError(
                "destabilized cascade penalties must be strictly larger than unstable penalties"
                    .to_string(),
            ));
        }
        if coherence.post_apotheosis_value > 80 {
            return Err(ConfigError::ValidationError(format!(
                "post_apotheosis_value {} would leave the character in Apotheosis",
                coherence.post_apotheosis_value
            )));
        }
        if self.rest.coherence_restore_target > 100 {
            return Err(ConfigError::ValidationError(
                "coherence_restore_target must be at most 100".to_string(),
            ));
        }
        if self.trauma_check.passed_stress_reset > 100
            || self.trauma_check.failed_stress_reset > 100
        {
            return Err(ConfigError::ValidationError(
                "trauma check stress resets must be at most 100".to_string(),
            ));
        }
        if self.trauma_check.stress_per_extra_success == 0 {
            return Err(ConfigError::ValidationError(
                "stress_per_extra_success must be positive".to_string(),
            ));
        }
        if self.corruption.defense_penalty_divisor == 0 {
            return Err(ConfigError::ValidationError(
                "corruption defense_penalty_divisor must be positive".to_string(),
            ));
        }
        if self.resistance.dc_step == 0 {
            return Err(ConfigError::ValidationError(
                "resistance dc_step must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResistanceConstants {
    /// DC at which the full WILL pool is rolled
    #[serde(default = "default_base_dc")]
    pub base_dc: u32,
    /// Every `dc_step` above the base DC removes one die from the pool
    #[serde(default = "default_dc_step")]
    pub dc_step: u32,
    /// Pool never shrinks below this many dice
    #[serde(default = "default_min_pool")]
    pub min_pool: u32,
}

impl Default for ResistanceConstants {
    fn default() -> Self {
        ResistanceConstants {
            base_dc: 10,
            dc_step: 5,
            min_pool: 1,
        }
    }
}

fn default_base_dc() -> u32 {
    10
}
fn default_dc_step() -> u32 {
    5
}
fn default_min_pool() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    /// Percentage of residual damage converted into stress
    pub stress_per_damage_percent: u32,
    /// Extra stress when an ally died during the hit
    pub ally_death_stress: u32,
    /// Resist DC for an ordinary hit
    pub standard_dc: u32,
    pub critical_hit_dc: u32,
    pub interrupt_dc: u32,
    pub ally_death_dc: u32,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            stress_per_damage_percent: 100,
            ally_death_stress: 15,
            standard_dc: 10,
            critical_hit_dc: 20,
            interrupt_dc: 15,
            ally_death_dc: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConstants {
    /// Short rest recovers WILL x this
    pub short_will_multiplier: u32,
    /// Long rest recovers WILL x this
    pub long_will_multiplier: u32,
    /// Fixed recovery on reaching a milestone
    pub milestone_recovery: u32,
    /// Coherence is raised to this value by extended rests (never lowered)
    pub coherence_restore_target: u32,
}

impl Default for RestConstants {
    fn default() -> Self {
        RestConstants {
            short_will_multiplier: 2,
            long_will_multiplier: 5,
            milestone_recovery: 25,
            coherence_restore_target: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraumaCheckConstants {
    /// Net successes needed at zero stress
    pub base_required_successes: u32,
    /// One more success is required per this much stress
    pub stress_per_extra_success: u32,
    /// Stress after a passed check at the breaking point
    pub passed_stress_reset: u32,
    /// Stress after a failed check at the breaking point
    pub failed_stress_reset: u32,
}

impl Default for TraumaCheckConstants {
    fn default() -> Self {
        TraumaCheckConstants {
            base_required_successes: 1,
            stress_per_extra_success: 40,
            passed_stress_reset: 75,
            failed_stress_reset: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorruptionConstants {
    /// Defense penalty is floor(corruption / divisor)
    pub defense_penalty_divisor: u32,
}

impl Default for CorruptionConstants {
    fn default() -> Self {
        CorruptionConstants {
            defense_penalty_divisor: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RageConstants {
    pub decay_per_turn: u32,
    /// Stress reduction a resting Berserker grants allies
    pub party_stress_reduction: u32,
}

impl Default for RageConstants {
    fn default() -> Self {
        RageConstants {
            decay_per_turn: 10,
            party_stress_reduction: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConstants {
    pub decay_per_turn: u32,
}

impl Default for MomentumConstants {
    fn default() -> Self {
        MomentumConstants { decay_per_turn: 15 }
    }
}

/// Penalties applied when a coherence cascade fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadePenalties {
    pub coherence_loss: u32,
    pub self_damage: u32,
    pub stress_gain: u32,
    pub corruption_gain: u32,
}

impl CascadePenalties {
    /// True when every penalty is at least as large and the total is larger
    pub fn exceeds(&self, other: &CascadePenalties) -> bool {
        self.coherence_loss >= other.coherence_loss
            && self.self_damage >= other.self_damage
            && self.stress_gain >= other.stress_gain
            && self.corruption_gain >= other.corruption_gain
            && self.total() > other.total()
    }

    fn total(&self) -> u32 {
        self.coherence_loss + self.self_damage + self.stress_gain + self.corruption_gain
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceConstants {
    pub decay_per_turn: u32,
    /// Stress paid each turn while in Apotheosis
    pub apotheosis_stress_cost: u32,
    /// Coherence after an explicit Apotheosis exit
    pub post_apotheosis_value: u32,
    pub meditate_amount: u32,
    /// Percent chance (1d100 <= chance)
    pub destabilized_cascade_chance: u32,
    pub unstable_cascade_chance: u32,
    pub destabilized: CascadePenalties,
    pub unstable: CascadePenalties,
}

impl Default for CoherenceConstants {
    fn default() -> Self {
        CoherenceConstants {
            decay_per_turn: 0,
            apotheosis_stress_cost: 10,
            post_apotheosis_value: 50,
            meditate_amount: 20,
            destabilized_cascade_chance: 25,
            unstable_cascade_chance: 10,
            destabilized: CascadePenalties {
                coherence_loss: 15,
                self_damage: 10,
                stress_gain: 10,
                corruption_gain: 5,
            },
            unstable: CascadePenalties {
                coherence_loss: 5,
                self_damage: 5,
                stress_gain: 5,
                corruption_gain: 0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConstants {
    /// Environmental stress per turn never exceeds this
    pub environmental_stress_cap: u32,
    /// HP lost to a self-harm panic
    pub panic_self_damage: u32,
    /// Stress gained from a hysteria panic
    pub panic_stress: u32,
}

impl Default for TurnConstants {
    fn default() -> Self {
        TurnConstants {
            environmental_stress_cap: 5,
            panic_self_damage: 5,
            panic_stress: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningConstants {
    pub stress_elevated: u32,
    pub stress_critical: u32,
    pub corruption_elevated: u32,
    pub corruption_critical: u32,
    pub rage_critical: u32,
    pub momentum_critical: u32,
    /// Coherence at or below this is critical
    pub coherence_critical: u32,
}

impl Default for WarningConstants {
    fn default() -> Self {
        WarningConstants {
            stress_elevated: 60,
            stress_critical: 80,
            corruption_elevated: 50,
            corruption_critical: 75,
            rage_critical: 90,
            momentum_critical: 90,
            coherence_critical: 20,
        }
    }
}
