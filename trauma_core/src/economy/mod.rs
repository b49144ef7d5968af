//! TraumaEconomy - single entry point over a character store
//!
//! Every operation loads the character by ID, runs one handler or tracker,
//! and writes the character back. Game-flow refusals come back as
//! `ActionOutcome::Rejected` and leave the store untouched.

mod snapshot;
mod warnings;

pub use snapshot::{ResourceSnapshot, TraumaEconomyState};
pub use warnings::{
    active_warnings, total_defense_penalty, total_skill_penalty, warning_level, WarningLevel,
};

use crate::character::{Character, CharacterRepository};
use crate::config::{load_constants, EconomyConstants};
use crate::corruption::{CorruptionChange, CorruptionTracker};
use crate::dice::DiceOracle;
use crate::error::TraumaError;
use crate::handlers::{
    DamageContext, DamageHandler, DamageIntegrationResult, PartyContext, RestHandler,
    RestIntegrationResult, TurnEndContext, TurnEndResult, TurnHandler, TurnStartContext,
    TurnStartResult,
};
use crate::specialization::{
    ApotheosisExit, CascadeResult, CoherenceTracker, DecayingResource, APOTHEOSIS_EXIT_REASON,
    MAX_RESOURCE,
};
use crate::stress::{RecoveryResult, StressTracker};
use crate::trauma::{
    record_trauma, TraumaCheck, TraumaCheckResult, TraumaRecord, TraumaRegistry, TraumaTrigger,
};
use crate::types::{ActionOutcome, CharacterId, PreconditionFailure, ResourceChange, RestType};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reason recorded when a character leaves Apotheosis by choice
pub const VOLUNTARY_EXIT_REASON: &str = "Voluntary exit";

/// Result of an explicit trauma check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaCheckOutcome {
    pub check: TraumaCheckResult,
    pub recorded: Option<TraumaRecord>,
    /// Present when the check was taken at the breaking point
    pub stress_reset: Option<RecoveryResult>,
}

/// Orchestrator over a character repository, a dice source and a trauma check
pub struct TraumaEconomy<R, D, T>
where
    R: CharacterRepository,
    D: DiceOracle,
    T: TraumaCheck,
{
    repository: R,
    dice: D,
    trauma_check: T,
    constants: EconomyConstants,
    registry: TraumaRegistry,
}

impl<R, D, T> TraumaEconomy<R, D, T>
where
    R: CharacterRepository,
    D: DiceOracle,
    T: TraumaCheck,
{
    /// Create an economy with default constants and trauma definitions
    pub fn new(repository: R, dice: D, trauma_check: T) -> Self {
        TraumaEconomy {
            repository,
            dice,
            trauma_check,
            constants: EconomyConstants::default(),
            registry: TraumaRegistry::with_defaults(),
        }
    }

    pub fn with_constants(mut self, constants: EconomyConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Replace the trauma definitions used both for trauma checks and for
    /// HP penalties
    pub fn with_registry(mut self, registry: TraumaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the constants with a validated TOML file
    pub fn with_constants_file(self, path: &Path) -> Result<Self, TraumaError> {
        let constants = load_constants(path)?;
        tracing::info!(path = %path.display(), "economy constants loaded");
        Ok(self.with_constants(constants))
    }

    /// Replace the trauma definitions with a TOML file
    pub fn with_registry_file(self, path: &Path) -> Result<Self, TraumaError> {
        let registry = TraumaRegistry::load(path)?;
        tracing::info!(
            path = %path.display(),
            traumas = registry.len(),
            "trauma definitions loaded"
        );
        Ok(self.with_registry(registry))
    }

    pub fn constants(&self) -> &EconomyConstants {
        &self.constants
    }

    pub fn registry(&self) -> &TraumaRegistry {
        &self.registry
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn trauma_check(&self) -> &T {
        &self.trauma_check
    }

    fn load(&self, id: CharacterId) -> Result<Character, TraumaError> {
        Ok(self.repository.get_by_id(id)?)
    }

    fn save(&mut self, character: &Character) -> Result<(), TraumaError> {
        self.repository.update(character)?;
        Ok(())
    }

    // === Queries ===

    pub fn get_state(&self, id: CharacterId) -> Result<TraumaEconomyState, TraumaError> {
        let character = self.load(id)?;
        Ok(TraumaEconomyState::from_character(
            &character,
            &self.constants,
            &self.registry,
        ))
    }

    /// Alias of `get_state`, for hosts that persist or display snapshots
    pub fn create_snapshot(&self, id: CharacterId) -> Result<TraumaEconomyState, TraumaError> {
        self.get_state(id)
    }

    pub fn effective_max_hp(&self, id: CharacterId) -> Result<u32, TraumaError> {
        let character = self.load(id)?;
        Ok(self.registry.effective_max_hp(character.base_max_hp, character.traumas()))
    }

    pub fn total_defense_penalty(&self, id: CharacterId) -> Result<u32, TraumaError> {
        let character = self.load(id)?;
        Ok(total_defense_penalty(&character, &self.constants))
    }

    pub fn total_skill_penalty(&self, id: CharacterId) -> Result<u32, TraumaError> {
        let character = self.load(id)?;
        Ok(total_skill_penalty(&character))
    }

    pub fn active_warnings(&self, id: CharacterId) -> Result<Vec<String>, TraumaError> {
        let character = self.load(id)?;
        Ok(active_warnings(&character, &self.constants))
    }

    pub fn warning_level(&self, id: CharacterId) -> Result<WarningLevel, TraumaError> {
        let character = self.load(id)?;
        Ok(warning_level(&character, &self.constants))
    }

    // === Handlers ===

    pub fn process_damage(
        &mut self,
        id: CharacterId,
        damage: u32,
        context: &DamageContext,
    ) -> Result<DamageIntegrationResult, TraumaError> {
        let mut character = self.load(id)?;
        let result = DamageHandler::new(&self.constants).process_damage(
            &mut character,
            damage,
            context,
            &mut self.dice,
        );
        self.save(&character)?;
        Ok(result)
    }

    /// Rest one character, with an optional Berserker ally from the party
    ///
    /// The ally is only read. Naming the resting character as its own ally,
    /// or an ally outside a non-empty member list, is rejected before any
    /// change is made.
    pub fn process_rest(
        &mut self,
        id: CharacterId,
        rest_type: RestType,
        party: &PartyContext,
    ) -> Result<RestIntegrationResult, TraumaError> {
        if let Some(ally_id) = party.berserker_ally {
            if ally_id == id {
                return Err(TraumaError::invalid_argument(
                    "a character cannot be their own berserker ally",
                ));
            }
            if !party.member_ids.is_empty() && !party.member_ids.contains(&ally_id) {
                return Err(TraumaError::invalid_argument(format!(
                    "berserker ally {} is not a party member",
                    ally_id
                )));
            }
        }

        let mut character = self.load(id)?;
        let ally = party.berserker_ally.map(|ally_id| self.load(ally_id)).transpose()?;

        let result = RestHandler::new(&self.constants).process_rest(
            &mut character,
            rest_type,
            ally.as_ref(),
            &mut self.trauma_check,
            &self.registry,
        );
        self.save(&character)?;
        Ok(result)
    }

    pub fn process_turn_start(
        &mut self,
        id: CharacterId,
        context: &TurnStartContext,
    ) -> Result<TurnStartResult, TraumaError> {
        let mut character = self.load(id)?;
        let result = TurnHandler::new(&self.constants).process_turn_start(
            &mut character,
            context,
            &mut self.dice,
        );
        self.save(&character)?;
        Ok(result)
    }

    pub fn process_turn_end(
        &mut self,
        id: CharacterId,
        context: &TurnEndContext,
    ) -> Result<TurnEndResult, TraumaError> {
        let mut character = self.load(id)?;
        let result = TurnHandler::new(&self.constants).process_turn_end(
            &mut character,
            context,
            &mut self.dice,
        );
        self.save(&character)?;
        Ok(result)
    }

    // === Stress / Trauma / Corruption ===

    /// Run a trauma check, record any trauma, and reset stress if it was taken
    /// at the breaking point
    pub fn run_trauma_check(
        &mut self,
        id: CharacterId,
        trigger: TraumaTrigger,
    ) -> Result<TraumaCheckOutcome, TraumaError> {
        let mut character = self.load(id)?;
        let check = self
            .trauma_check
            .perform_trauma_check(&character, trigger, &self.registry);

        let recorded = match (&check.trauma_acquired, check.passed) {
            (Some(trauma_id), false) => Some(record_trauma(&mut character, trauma_id, trigger)),
            _ => None,
        };
        let tracker = StressTracker::new(&self.constants);
        let stress_reset = character
            .stress()
            .requires_trauma_check()
            .then(|| tracker.reset_after_trauma_check(&mut character, check.passed));

        self.save(&character)?;
        Ok(TraumaCheckOutcome {
            check,
            recorded,
            stress_reset,
        })
    }

    /// Ad-hoc recovery outside the rest table
    pub fn recover_stress(
        &mut self,
        id: CharacterId,
        amount: u32,
        source: &str,
    ) -> Result<RecoveryResult, TraumaError> {
        let mut character = self.load(id)?;
        let tracker = StressTracker::new(&self.constants);
        let result = tracker.recover_stress_amount(&mut character, amount, source);
        self.save(&character)?;
        Ok(result)
    }

    pub fn apply_corruption(
        &mut self,
        id: CharacterId,
        amount: u32,
        source: &str,
    ) -> Result<CorruptionChange, TraumaError> {
        let mut character = self.load(id)?;
        let result = CorruptionTracker::new().apply_corruption(&mut character, amount, source);
        self.save(&character)?;
        Ok(result)
    }

    pub fn purge_corruption(
        &mut self,
        id: CharacterId,
        amount: u32,
        source: &str,
    ) -> Result<CorruptionChange, TraumaError> {
        let mut character = self.load(id)?;
        let result = CorruptionTracker::new().purge_corruption(&mut character, amount, source);
        self.save(&character)?;
        Ok(result)
    }

    // === Specialization ===

    pub fn gain_resource(
        &mut self,
        id: CharacterId,
        amount: u32,
    ) -> Result<ActionOutcome<ResourceChange>, TraumaError> {
        let mut character = self.load(id)?;
        let outcome = match character.specialization_mut() {
            None => ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing),
            Some(spec) if spec.current() >= MAX_RESOURCE => {
                ActionOutcome::Rejected(PreconditionFailure::AlreadyAtMaximum)
            }
            Some(spec) => ActionOutcome::Applied(spec.resource_mut().gain(amount)),
        };
        self.commit(&character, outcome)
    }

    /// Spend from the resource; an empty resource or an overdraw is refused
    pub fn spend_resource(
        &mut self,
        id: CharacterId,
        amount: u32,
    ) -> Result<ActionOutcome<ResourceChange>, TraumaError> {
        let mut character = self.load(id)?;
        let outcome = match character.specialization_mut() {
            None => ActionOutcome::Rejected(PreconditionFailure::SpecializationMissing),
            Some(spec) if spec.current() == 0 && amount > 0 => {
                ActionOutcome::Rejected(PreconditionFailure::AlreadyAtMinimum)
            }
            Some(spec) if spec.current() < amount => {
                ActionOutcome::Rejected(PreconditionFailure::InsufficientResource)
            }
            Some(spec) => ActionOutcome::Applied(spec.resource_mut().lose(amount)),
        };
        self.commit(&character, outcome)
    }

    pub fn check_cascade(
        &mut self,
        id: CharacterId,
    ) -> Result<ActionOutcome<CascadeResult>, TraumaError> {
        let mut character = self.load(id)?;
        let outcome =
            CoherenceTracker::new(&self.constants).check_cascade(&mut character, &mut self.dice);
        self.commit(&character, outcome)
    }

    pub fn meditate(
        &mut self,
        id: CharacterId,
        in_combat: bool,
    ) -> Result<ActionOutcome<ResourceChange>, TraumaError> {
        let mut character = self.load(id)?;
        let outcome = CoherenceTracker::new(&self.constants).meditate(&mut character, in_combat);
        self.commit(&character, outcome)
    }

    /// Leave Apotheosis; the reason reflects whether stress forced it
    pub fn exit_apotheosis(
        &mut self,
        id: CharacterId,
    ) -> Result<ActionOutcome<ApotheosisExit>, TraumaError> {
        let mut character = self.load(id)?;
        let reason = if character.stress().requires_trauma_check() {
            APOTHEOSIS_EXIT_REASON
        } else {
            VOLUNTARY_EXIT_REASON
        };
        let outcome =
            CoherenceTracker::new(&self.constants).exit_apotheosis(&mut character, reason);
        self.commit(&character, outcome)
    }

    /// Persist only applied outcomes
    fn commit<O>(
        &mut self,
        character: &Character,
        outcome: ActionOutcome<O>,
    ) -> Result<ActionOutcome<O>, TraumaError> {
        if let Some(reason) = outcome.rejection() {
            tracing::debug!(character = %character.id, %reason, "action rejected");
        } else {
            self.save(character)?;
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{InMemoryCharacterRepository, MockCharacterRepository, RepositoryError};
    use crate::dice::ScriptedDice;
    use crate::specialization::SpecializationResource;
    use crate::trauma::{MockTraumaCheck, WillTraumaCheck};

    type TestEconomy = TraumaEconomy<InMemoryCharacterRepository, ScriptedDice, MockTraumaCheck>;

    fn economy_with(
        characters: Vec<Character>,
        check: MockTraumaCheck,
    ) -> (TestEconomy, Vec<CharacterId>) {
        let mut repository = InMemoryCharacterRepository::new();
        let ids = characters.into_iter().map(|c| repository.insert(c)).collect();
        (TraumaEconomy::new(repository, ScriptedDice::new(), check), ids)
    }

    fn no_checks() -> MockTraumaCheck {
        let mut check = MockTraumaCheck::new();
        check.expect_perform_trauma_check().times(0);
        check
    }

    fn stored(economy: &TestEconomy, id: CharacterId) -> Character {
        economy.repository().get(id).cloned().unwrap()
    }

    #[test]
    fn test_long_rest_runs_exactly_one_check() {
        let mut check = MockTraumaCheck::new();
        check
            .expect_perform_trauma_check()
            .withf(|_, trigger, _| *trigger == TraumaTrigger::ProlongedExposure)
            .times(1)
            .returning(|_, trigger, _| TraumaCheckResult::passed(trigger));

        let arcanist = Character::new("Ilse", 4, 30)
            .unwrap()
            .with_stress(60)
            .with_specialization(SpecializationResource::coherence(30));
        let berserker = Character::new("Hrolf", 2, 50)
            .unwrap()
            .with_specialization(SpecializationResource::rage(0));
        let (mut economy, ids) = economy_with(vec![arcanist, berserker], check);

        let result = economy
            .process_rest(ids[0], RestType::Long, &PartyContext::with_berserker(ids[1]))
            .unwrap();

        assert_eq!(result.stress.current, 30);
        let character = stored(&economy, ids[0]);
        assert_eq!(character.stress().current(), 30);
        assert_eq!(character.specialization().unwrap().current(), 50);
    }

    #[test]
    fn test_self_as_ally_rejected_before_mutation() {
        let character = Character::new("Ilse", 4, 30).unwrap().with_stress(60);
        let (mut economy, ids) = economy_with(vec![character], no_checks());

        let party = PartyContext {
            member_ids: vec![],
            berserker_ally: Some(ids[0]),
        };
        let err = economy.process_rest(ids[0], RestType::Long, &party).unwrap_err();

        assert!(matches!(err, TraumaError::InvalidArgument(_)));
        assert_eq!(stored(&economy, ids[0]).stress().current(), 60);
    }

    #[test]
    fn test_ally_outside_member_list_rejected() {
        let resting = Character::new("Ilse", 4, 30).unwrap().with_stress(60);
        let member = Character::new("Mira", 3, 30).unwrap().with_stress(45);
        let berserker = Character::new("Hrolf", 2, 50)
            .unwrap()
            .with_specialization(SpecializationResource::rage(40));
        let (mut economy, ids) = economy_with(vec![resting, member, berserker], no_checks());

        let party = PartyContext {
            member_ids: vec![ids[1]],
            berserker_ally: Some(ids[2]),
        };
        let err = economy.process_rest(ids[0], RestType::Long, &party).unwrap_err();
        assert!(matches!(err, TraumaError::InvalidArgument(_)));
        assert_eq!(stored(&economy, ids[0]).stress().current(), 60);

        // Listed members are never rested themselves
        let party = PartyContext {
            member_ids: vec![ids[1], ids[2]],
            berserker_ally: None,
        };
        economy.process_rest(ids[0], RestType::Short, &party).unwrap();
        assert_eq!(stored(&economy, ids[1]).stress().current(), 45);
    }

    #[test]
    fn test_missing_ally_is_not_found() {
        let character = Character::new("Ilse", 4, 30).unwrap().with_stress(60);
        let (mut economy, ids) = economy_with(vec![character], no_checks());
        let ghost = CharacterId::new();

        let err = economy
            .process_rest(ids[0], RestType::Long, &PartyContext::with_berserker(ghost))
            .unwrap_err();

        assert!(matches!(err, TraumaError::NotFound(id) if id == ghost));
        assert_eq!(stored(&economy, ids[0]).stress().current(), 60);
    }

    #[test]
    fn test_run_trauma_check_at_breaking_point() {
        let mut check = MockTraumaCheck::new();
        check
            .expect_perform_trauma_check()
            .times(1)
            .returning(|_, trigger, _| TraumaCheckResult::failed(trigger, "hollow-stare"));

        let character = Character::new("Oren", 3, 30).unwrap().with_stress(100);
        let (mut economy, ids) = economy_with(vec![character], check);

        let outcome = economy.run_trauma_check(ids[0], TraumaTrigger::BreakingPoint).unwrap();

        assert!(outcome.recorded.is_some());
        assert_eq!(outcome.stress_reset.unwrap().current, 50);
        let character = stored(&economy, ids[0]);
        assert_eq!(character.stress().current(), 50);
        assert_eq!(character.traumas().len(), 1);
    }

    #[test]
    fn test_run_trauma_check_below_breaking_point_keeps_stress() {
        let mut check = MockTraumaCheck::new();
        check
            .expect_perform_trauma_check()
            .times(1)
            .returning(|_, trigger, _| TraumaCheckResult::passed(trigger));

        let character = Character::new("Oren", 3, 30).unwrap().with_stress(40);
        let (mut economy, ids) = economy_with(vec![character], check);

        let outcome = economy.run_trauma_check(ids[0], TraumaTrigger::WitnessedHorror).unwrap();
        assert!(outcome.stress_reset.is_none());
        assert_eq!(stored(&economy, ids[0]).stress().current(), 40);
    }

    #[test]
    fn test_gain_and_spend_resource() {
        let character = Character::new("Mira", 3, 30)
            .unwrap()
            .with_specialization(SpecializationResource::momentum(90));
        let (mut economy, ids) = economy_with(vec![character], no_checks());

        let change = economy.gain_resource(ids[0], 25).unwrap().applied().unwrap();
        assert_eq!(change, ResourceChange::new(90, 100));

        let outcome = economy.gain_resource(ids[0], 5).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::AlreadyAtMaximum));

        let outcome = economy.spend_resource(ids[0], 120).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::InsufficientResource));

        let change = economy.spend_resource(ids[0], 40).unwrap().applied().unwrap();
        assert_eq!(change.current, 60);
        assert_eq!(stored(&economy, ids[0]).specialization().unwrap().current(), 60);

        economy.spend_resource(ids[0], 60).unwrap();
        let outcome = economy.spend_resource(ids[0], 1).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::AlreadyAtMinimum));
    }

    #[test]
    fn test_resource_ops_without_specialization() {
        let character = Character::new("Bram", 3, 30).unwrap();
        let (mut economy, ids) = economy_with(vec![character], no_checks());

        let outcome = economy.gain_resource(ids[0], 5).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::SpecializationMissing));
        let outcome = economy.meditate(ids[0], false).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::SpecializationMissing));
    }

    #[test]
    fn test_exit_apotheosis_reason() {
        let forced = Character::new("Ilse", 3, 30)
            .unwrap()
            .with_stress(100)
            .with_specialization(SpecializationResource::coherence(90));
        let voluntary = Character::new("Vesna", 3, 30)
            .unwrap()
            .with_specialization(SpecializationResource::coherence(90));
        let (mut economy, ids) = economy_with(vec![forced, voluntary], no_checks());

        let exit = economy.exit_apotheosis(ids[0]).unwrap().applied().unwrap();
        assert_eq!(exit.reason, APOTHEOSIS_EXIT_REASON);
        assert_eq!(exit.coherence.current, 50);

        let exit = economy.exit_apotheosis(ids[1]).unwrap().applied().unwrap();
        assert_eq!(exit.reason, VOLUNTARY_EXIT_REASON);
    }

    #[test]
    fn test_derived_queries() {
        let mut character = Character::new("Tess", 3, 50)
            .unwrap()
            .with_stress(85)
            .with_corruption(50);
        record_trauma(&mut character, "blighted-flesh", TraumaTrigger::CorruptionSurge);
        let (economy, ids) = economy_with(vec![character], no_checks());

        assert_eq!(economy.effective_max_hp(ids[0]).unwrap(), 42);
        assert_eq!(economy.total_defense_penalty(ids[0]).unwrap(), 6);
        assert_eq!(economy.total_skill_penalty(ids[0]).unwrap(), 5);
        assert_eq!(economy.warning_level(ids[0]).unwrap(), WarningLevel::Critical);
        assert!(!economy.active_warnings(ids[0]).unwrap().is_empty());
    }

    #[test]
    fn test_custom_registry_drives_trauma_checks() {
        let registry = TraumaRegistry::parse(
            r#"
            [[traumas]]
            id = "shattered-mind"
            name = "Shattered Mind"
            triggers = ["prolonged_exposure"]
            max_hp_penalty_percent = 50
            "#,
        )
        .unwrap();
        // 0 net successes fails the check; the only candidate is drawn
        let dice = ScriptedDice::new().with_pools([0]).with_dies([1]);
        let check = WillTraumaCheck::with_defaults(dice);
        let mut repository = InMemoryCharacterRepository::new();
        let id = repository.insert(Character::new("Ilse", 3, 40).unwrap().with_stress(50));
        let mut economy =
            TraumaEconomy::new(repository, ScriptedDice::new(), check).with_registry(registry);

        let result = economy
            .process_rest(id, RestType::Long, &PartyContext::solo())
            .unwrap();

        let recorded = result.trauma_recorded.unwrap();
        assert_eq!(recorded.trauma_id, "shattered-mind");
        assert_eq!(economy.effective_max_hp(id).unwrap(), 20);
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let (economy, _) = economy_with(vec![], no_checks());
        let result = economy.with_constants_file(Path::new("/nonexistent/economy.toml"));
        assert!(matches!(result, Err(TraumaError::Config(_))));
    }

    #[test]
    fn test_unknown_character_is_not_found() {
        let (mut economy, _) = economy_with(vec![], no_checks());
        let id = CharacterId::new();

        assert!(matches!(economy.get_state(id), Err(TraumaError::NotFound(_))));
        assert!(matches!(
            economy.process_damage(id, 5, &DamageContext::new()),
            Err(TraumaError::NotFound(_))
        ));
        assert!(matches!(
            economy.apply_corruption(id, 5, "relic"),
            Err(TraumaError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejected_outcome_is_not_persisted() {
        let character = Character::new("Ilse", 3, 30)
            .unwrap()
            .with_specialization(SpecializationResource::coherence(50));
        let id = character.id;

        let mut repository = MockCharacterRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(character.clone()));
        repository.expect_update().times(0);

        let mut economy = TraumaEconomy::new(repository, ScriptedDice::new(), no_checks());
        let outcome = economy.meditate(id, true).unwrap();
        assert_eq!(outcome.rejection(), Some(PreconditionFailure::InCombat));
    }

    #[test]
    fn test_storage_failure_surfaces() {
        let character = Character::new("Ilse", 3, 30).unwrap();
        let id = character.id;

        let mut repository = MockCharacterRepository::new();
        repository
            .expect_get_by_id()
            .returning(move |_| Ok(character.clone()));
        repository
            .expect_update()
            .times(1)
            .returning(|_| Err(RepositoryError::Storage("disk full".to_string())));

        let mut economy = TraumaEconomy::new(repository, ScriptedDice::new(), no_checks());
        let err = economy.recover_stress(id, 5, "prayer").unwrap_err();
        assert!(matches!(err, TraumaError::Repository(msg) if msg == "disk full"));
    }
}
