//! Save state for player progress
//!
//! A player's persistent attributes are written as one flat JSON record:
//! name, health, maxHealth, attackPower, level, experience,
//! experienceToNextLevel and inventory. Status effects, buffs and cooldowns
//! are not persisted.

mod store;

pub use store::{validate_key, FileStore, KeyValueStore, MemoryStore, StoreError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::character::{Character, Class};
use crate::inventory::Inventory;
use crate::rules::INVENTORY_MAX_ITEMS;

/// Default storage key for the save record
pub const SAVE_KEY: &str = "rpg_save";

/// Save and load errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no save found under '{0}'")]
    NotFound(String),

    #[error("invalid save data: {0}")]
    Invalid(String),

    #[error("{0} is not a player character")]
    NotAPlayer(String),
}

/// The persisted record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub inventory: Vec<String>,
}

impl SaveData {
    /// Snapshot a player's persistent attributes
    pub fn from_player(player: &Character) -> Result<Self, SaveError> {
        let progression = player
            .progression()
            .ok_or_else(|| SaveError::NotAPlayer(player.name().to_string()))?;

        Ok(Self {
            name: player.name().to_string(),
            health: player.health(),
            max_health: player.max_health(),
            attack_power: player.attack_power(),
            level: progression.level(),
            experience: progression.experience(),
            experience_to_next_level: progression.experience_to_next_level(),
            inventory: progression.inventory().items().to_vec(),
        })
    }

    pub fn encode(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a saved record
    pub fn decode(raw: &str) -> Result<Self, SaveError> {
        let data: SaveData = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    /// Check the invariants a live player must satisfy
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.max_health == 0 {
            return Err(SaveError::Invalid("maxHealth must be positive".into()));
        }
        if self.health > self.max_health {
            return Err(SaveError::Invalid(format!(
                "health {} exceeds maxHealth {}",
                self.health, self.max_health
            )));
        }
        if self.level == 0 {
            return Err(SaveError::Invalid("level must be at least 1".into()));
        }
        if self.experience_to_next_level == 0 {
            return Err(SaveError::Invalid(
                "experienceToNextLevel must be positive".into(),
            ));
        }
        if self.inventory.len() > INVENTORY_MAX_ITEMS {
            return Err(SaveError::Invalid(format!(
                "{} inventory items exceed capacity {}",
                self.inventory.len(),
                INVENTORY_MAX_ITEMS
            )));
        }
        Ok(())
    }

    /// Overwrite a player's persistent attributes
    pub fn apply_to(self, player: &mut Character) -> Result<(), SaveError> {
        self.validate()?;
        let Class::Player(progression) = &mut player.class else {
            return Err(SaveError::NotAPlayer(player.name.clone()));
        };

        progression.level = self.level;
        progression.experience = self.experience;
        progression.experience_to_next_level = self.experience_to_next_level;
        progression.inventory = Inventory::with_items(self.inventory);

        player.name = self.name;
        player.max_health = self.max_health;
        player.health = self.health;
        player.attack_power = self.attack_power;

        Ok(())
    }

    /// A fresh player carrying this record
    pub fn into_player(self) -> Result<Character, SaveError> {
        let mut player = Character::player(self.name.clone(), self.max_health, self.attack_power);
        self.apply_to(&mut player)?;
        Ok(player)
    }
}

/// User-facing result of a save or load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub success: bool,
    pub message: String,
}

impl ProgressReport {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

impl Character {
    /// Write this player's record under `key`
    pub fn save_to<S>(&self, store: &mut S, key: &str) -> Result<(), SaveError>
    where
        S: KeyValueStore + ?Sized,
    {
        let encoded = SaveData::from_player(self)?.encode()?;
        store.set(key, &encoded)?;
        info!("Saved progress for {} under {}", self.name, key);
        Ok(())
    }

    /// Replace this player's persistent attributes with the record under `key`
    pub fn load_from<S>(&mut self, store: &S, key: &str) -> Result<(), SaveError>
    where
        S: KeyValueStore + ?Sized,
    {
        let raw = store
            .get(key)?
            .ok_or_else(|| SaveError::NotFound(key.to_string()))?;
        SaveData::decode(&raw)?.apply_to(self)?;
        info!("Loaded progress for {} from {}", self.name, key);
        Ok(())
    }

    /// Save under [`SAVE_KEY`], reporting the outcome as a message
    pub fn save_progress<S>(&self, store: &mut S) -> ProgressReport
    where
        S: KeyValueStore + ?Sized,
    {
        self.save_progress_as(store, SAVE_KEY)
    }

    pub fn save_progress_as<S>(&self, store: &mut S, key: &str) -> ProgressReport
    where
        S: KeyValueStore + ?Sized,
    {
        match self.save_to(store, key) {
            Ok(()) => ProgressReport::ok("Progress saved!"),
            Err(e) => {
                warn!("Failed to save progress for {}: {}", self.name, e);
                ProgressReport::failed("Error saving progress!")
            }
        }
    }

    /// Load from [`SAVE_KEY`], reporting the outcome as a message
    pub fn load_progress<S>(&mut self, store: &S) -> ProgressReport
    where
        S: KeyValueStore + ?Sized,
    {
        self.load_progress_from(store, SAVE_KEY)
    }

    pub fn load_progress_from<S>(&mut self, store: &S, key: &str) -> ProgressReport
    where
        S: KeyValueStore + ?Sized,
    {
        match self.load_from(store, key) {
            Ok(()) => ProgressReport::ok("Progress loaded successfully!"),
            Err(SaveError::NotFound(_)) => ProgressReport::failed("No save file found."),
            Err(e) => {
                warn!("Failed to load progress for {}: {}", self.name, e);
                ProgressReport::failed("Error loading progress!")
            }
        }
    }
}
