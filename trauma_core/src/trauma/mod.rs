//! Trauma - permanent, append-only records acquired from failed checks

mod check;

pub use check::{TraumaCheck, TraumaCheckResult, WillTraumaCheck};

#[cfg(test)]
pub use check::MockTraumaCheck;

use crate::character::Character;
use crate::config::ConfigError;
use crate::error::TraumaError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// What forced the trauma check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraumaTrigger {
    /// Stress reached 100
    BreakingPoint,
    /// Accumulated strain examined during an extended rest
    ProlongedExposure,
    AllyDeath,
    CorruptionSurge,
    WitnessedHorror,
}

impl TraumaTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            TraumaTrigger::BreakingPoint => "breaking_point",
            TraumaTrigger::ProlongedExposure => "prolonged_exposure",
            TraumaTrigger::AllyDeath => "ally_death",
            TraumaTrigger::CorruptionSurge => "corruption_surge",
            TraumaTrigger::WitnessedHorror => "witnessed_horror",
        }
    }
}

impl fmt::Display for TraumaTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TraumaTrigger {
    type Err = TraumaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breaking_point" => Ok(TraumaTrigger::BreakingPoint),
            "prolonged_exposure" => Ok(TraumaTrigger::ProlongedExposure),
            "ally_death" => Ok(TraumaTrigger::AllyDeath),
            "corruption_surge" => Ok(TraumaTrigger::CorruptionSurge),
            "witnessed_horror" => Ok(TraumaTrigger::WitnessedHorror),
            other => Err(TraumaError::invalid_argument(format!(
                "unknown trauma trigger '{}'",
                other
            ))),
        }
    }
}

/// A trauma acquired by a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaRecord {
    pub trauma_id: String,
    pub acquired_at: DateTime<Utc>,
    pub trigger: TraumaTrigger,
}

impl TraumaRecord {
    /// Record acquired now
    pub fn new(trauma_id: impl Into<String>, trigger: TraumaTrigger) -> Self {
        Self::at(trauma_id, trigger, Utc::now())
    }

    pub fn at(
        trauma_id: impl Into<String>,
        trigger: TraumaTrigger,
        acquired_at: DateTime<Utc>,
    ) -> Self {
        TraumaRecord {
            trauma_id: trauma_id.into(),
            acquired_at,
            trigger,
        }
    }
}

/// Static description of a trauma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaDefinition {
    pub id: String,
    pub name: String,
    /// Triggers that can inflict this trauma
    pub triggers: Vec<TraumaTrigger>,
    /// Percentage of max HP lost while carrying this trauma
    #[serde(default)]
    pub max_hp_penalty_percent: u32,
    #[serde(default)]
    pub description: String,
}

/// Trauma definition registry
#[derive(Debug, Clone, Default)]
pub struct TraumaRegistry {
    /// Keyed by ID; ordered so trauma draws are reproducible
    definitions: BTreeMap<String, TraumaDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraumasConfig {
    traumas: Vec<TraumaDefinition>,
}

impl TraumaRegistry {
    pub fn new() -> Self {
        TraumaRegistry {
            definitions: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, definition: TraumaDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn get(&self, id: &str) -> Option<&TraumaDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions that a trigger can inflict, in ID order
    pub fn definitions_for(&self, trigger: TraumaTrigger) -> Vec<&TraumaDefinition> {
        self.definitions
            .values()
            .filter(|d| d.triggers.contains(&trigger))
            .collect()
    }

    /// Sum of max-HP penalties for a set of traumas (duplicates stack)
    pub fn max_hp_penalty_percent(&self, traumas: &[TraumaRecord]) -> u32 {
        traumas
            .iter()
            .filter_map(|t| self.get(&t.trauma_id))
            .map(|d| d.max_hp_penalty_percent)
            .sum()
    }

    /// Max HP after trauma penalties, never below 1
    pub fn effective_max_hp(&self, base_max_hp: u32, traumas: &[TraumaRecord]) -> u32 {
        let penalty = self.max_hp_penalty_percent(traumas).min(100);
        let reduced = base_max_hp as u64 * (100 - penalty) as u64 / 100;
        (reduced as u32).max(1)
    }

    /// Load trauma definitions from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: TraumasConfig = crate::config::load_toml(path)?;
        Ok(Self::from_definitions(config.traumas))
    }

    /// Load trauma definitions from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: TraumasConfig = crate::config::parse_toml(content)?;
        Ok(Self::from_definitions(config.traumas))
    }

    fn from_definitions(definitions: Vec<TraumaDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Load default trauma definitions
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(TraumaDefinition {
            id: "night-terrors".to_string(),
            name: "Night Terrors".to_string(),
            triggers: vec![TraumaTrigger::ProlongedExposure, TraumaTrigger::WitnessedHorror],
            max_hp_penalty_percent: 5,
            description: "Sleep brings no rest, only the same dream".to_string(),
        });

        registry.register(TraumaDefinition {
            id: "hollow-stare".to_string(),
            name: "Hollow Stare".to_string(),
            triggers: vec![TraumaTrigger::ProlongedExposure, TraumaTrigger::BreakingPoint],
            max_hp_penalty_percent: 0,
            description: "Something behind the eyes has gone quiet".to_string(),
        });

        registry.register(TraumaDefinition {
            id: "tremors".to_string(),
            name: "Tremors".to_string(),
            triggers: vec![TraumaTrigger::BreakingPoint, TraumaTrigger::WitnessedHorror],
            max_hp_penalty_percent: 10,
            description: "Hands shake whenever danger is near".to_string(),
        });

        registry.register(TraumaDefinition {
            id: "survivors-guilt".to_string(),
            name: "Survivor's Guilt".to_string(),
            triggers: vec![TraumaTrigger::AllyDeath],
            max_hp_penalty_percent: 5,
            description: "Every wound feels deserved".to_string(),
        });

        registry.register(TraumaDefinition {
            id: "blighted-flesh".to_string(),
            name: "Blighted Flesh".to_string(),
            triggers: vec![TraumaTrigger::CorruptionSurge],
            max_hp_penalty_percent: 15,
            description: "The taint has taken root in the body".to_string(),
        });

        registry
    }
}

/// Append a trauma to a character
pub fn record_trauma(
    character: &mut Character,
    trauma_id: &str,
    trigger: TraumaTrigger,
) -> TraumaRecord {
    let record = TraumaRecord::new(trauma_id, trigger);
    tracing::warn!(character = %character.id, trauma = trauma_id, %trigger, "trauma acquired");
    character.push_trauma(record.clone());
    record
}
