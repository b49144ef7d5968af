//! Core types shared across trackers and handlers

use crate::error::TraumaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Strongly typed character identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CharacterId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<CharacterId> for Uuid {
    fn from(value: CharacterId) -> Self {
        value.0
    }
}

/// Kind of rest taken by a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestType {
    /// A breather between encounters
    Short,
    /// A full night's rest
    Long,
    /// Rest inside a consecrated sanctuary (full stress reset)
    Sanctuary,
    /// Story milestone reached
    Milestone,
}

impl RestType {
    /// Get all rest types
    pub fn all() -> &'static [RestType] {
        &[
            RestType::Short,
            RestType::Long,
            RestType::Sanctuary,
            RestType::Milestone,
        ]
    }

    /// Long and Sanctuary rests grant party bonuses, restore Coherence and
    /// run a prolonged-exposure trauma check
    pub fn is_extended(&self) -> bool {
        matches!(self, RestType::Long | RestType::Sanctuary)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RestType::Short => "short rest",
            RestType::Long => "long rest",
            RestType::Sanctuary => "sanctuary rest",
            RestType::Milestone => "milestone",
        }
    }
}

impl FromStr for RestType {
    type Err = TraumaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(RestType::Short),
            "long" => Ok(RestType::Long),
            "sanctuary" => Ok(RestType::Sanctuary),
            "milestone" => Ok(RestType::Milestone),
            other => Err(TraumaError::invalid_argument(format!(
                "unknown rest type '{}'",
                other
            ))),
        }
    }
}

/// Before/after pair for a bounded resource mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub previous: u32,
    pub current: u32,
}

impl ResourceChange {
    pub fn new(previous: u32, current: u32) -> Self {
        ResourceChange { previous, current }
    }

    /// Signed difference (current - previous)
    pub fn delta(&self) -> i64 {
        self.current as i64 - self.previous as i64
    }

    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Why an expected game-flow action did not happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreconditionFailure {
    /// Action is only available out of combat
    InCombat,
    /// Resource is already full
    AlreadyAtMaximum,
    /// Resource is already empty
    AlreadyAtMinimum,
    /// Not enough of the resource to spend
    InsufficientResource,
    /// Action requires the Apotheosis state
    NotInApotheosis,
    /// Character does not carry the required specialization resource
    SpecializationMissing,
}

impl fmt::Display for PreconditionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PreconditionFailure::InCombat => "not available in combat",
            PreconditionFailure::AlreadyAtMaximum => "resource is already at maximum",
            PreconditionFailure::AlreadyAtMinimum => "resource is already empty",
            PreconditionFailure::InsufficientResource => "not enough of the resource",
            PreconditionFailure::NotInApotheosis => "not in Apotheosis",
            PreconditionFailure::SpecializationMissing => "specialization resource not present",
        };
        f.write_str(text)
    }
}

/// Outcome of an action that may be refused for game-flow reasons
///
/// Refusals are ordinary results, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome<T> {
    Applied(T),
    Rejected(PreconditionFailure),
}

impl<T> ActionOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    /// Get the applied value, if any
    pub fn applied(self) -> Option<T> {
        match self {
            ActionOutcome::Applied(value) => Some(value),
            ActionOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<PreconditionFailure> {
        match self {
            ActionOutcome::Applied(_) => None,
            ActionOutcome::Rejected(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionOutcome<U> {
        match self {
            ActionOutcome::Applied(value) => ActionOutcome::Applied(f(value)),
            ActionOutcome::Rejected(reason) => ActionOutcome::Rejected(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_type_parse() {
        assert_eq!("long".parse::<RestType>().unwrap(), RestType::Long);
        assert_eq!(" Sanctuary ".parse::<RestType>().unwrap(), RestType::Sanctuary);
        assert!("nap".parse::<RestType>().is_err());
    }

    #[test]
    fn test_extended_rests() {
        assert!(RestType::Long.is_extended());
        assert!(RestType::Sanctuary.is_extended());
        assert!(!RestType::Short.is_extended());
        assert!(!RestType::Milestone.is_extended());
    }

    #[test]
    fn test_resource_change_delta() {
        let change = ResourceChange::new(40, 25);
        assert_eq!(change.delta(), -15);
        assert!(change.changed());
        assert!(!ResourceChange::new(7, 7).changed());
    }

    #[test]
    fn test_action_outcome_accessors() {
        let applied: ActionOutcome<u32> = ActionOutcome::Applied(5);
        assert!(applied.is_applied());
        assert_eq!(applied.map(|v| v * 2).applied(), Some(10));

        let rejected: ActionOutcome<u32> = ActionOutcome::Rejected(PreconditionFailure::InCombat);
        assert_eq!(rejected.rejection(), Some(PreconditionFailure::InCombat));
        assert_eq!(rejected.applied(), None);
    }

    #[test]
    fn test_character_id_display_roundtrip() {
        let id = CharacterId::new();
        let uuid: Uuid = id.into();
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(CharacterId::from_uuid(uuid), id);
    }
}
