//! Character persistence seam

use super::Character;
use crate::types::CharacterId;
use std::collections::HashMap;
use thiserror::Error;

/// Repository error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Character not found: {0}")]
    NotFound(CharacterId),
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Load/save characters by ID
///
/// A missing character is always `RepositoryError::NotFound`, never a no-op.
#[cfg_attr(test, mockall::automock)]
pub trait CharacterRepository {
    fn get_by_id(&self, id: CharacterId) -> Result<Character, RepositoryError>;

    fn update(&mut self, character: &Character) -> Result<(), RepositoryError>;
}

/// Per-character state store keyed by `CharacterId`
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacterRepository {
    characters: HashMap<CharacterId, Character>,
}

impl InMemoryCharacterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a character
    pub fn insert(&mut self, character: Character) -> CharacterId {
        let id = character.id;
        self.characters.insert(id, character);
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl CharacterRepository for InMemoryCharacterRepository {
    fn get_by_id(&self, id: CharacterId) -> Result<Character, RepositoryError> {
        self.characters
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn update(&mut self, character: &Character) -> Result<(), RepositoryError> {
        match self.characters.get_mut(&character.id) {
            Some(stored) => {
                *stored = character.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(character.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_not_found() {
        let repo = InMemoryCharacterRepository::new();
        let id = CharacterId::new();
        assert_eq!(repo.get_by_id(id).unwrap_err(), RepositoryError::NotFound(id));
    }

    #[test]
    fn test_update_roundtrip() {
        let mut repo = InMemoryCharacterRepository::new();
        let id = repo.insert(Character::new("Maud", 2, 20).unwrap());

        let mut loaded = repo.get_by_id(id).unwrap();
        loaded.current_hp = 5;
        repo.update(&loaded).unwrap();

        assert_eq!(repo.get(id).unwrap().current_hp, 5);
    }

    #[test]
    fn test_update_unknown_character_fails() {
        let mut repo = InMemoryCharacterRepository::new();
        let stray = Character::new("Stray", 2, 20).unwrap();
        assert!(matches!(
            repo.update(&stray),
            Err(RepositoryError::NotFound(_))
        ));
        assert!(repo.is_empty());
    }
}
