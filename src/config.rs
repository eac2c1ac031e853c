//! Session configuration
//!
//! Layered, lowest priority first:
//! - built-in defaults (a Hero against two Mages)
//! - a TOML file (`skirmish.toml` in the working directory, or `--config`)
//! - `SKIRMISH_` environment variables, `__` separating nested keys
//!   (`SKIRMISH_PLAYER__NAME=Aria`, `SKIRMISH_SEED=7`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::Character;
use crate::combat::{Dice, Rewards};
use crate::rules::{PLAYER_INITIAL_ATTACK_POWER, PLAYER_INITIAL_HEALTH, XP_GAIN_PER_ENEMY};
use crate::save::{validate_key, SAVE_KEY};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "skirmish.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),

    #[error("config error: {0}")]
    Figment(#[from] figment::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Enemy class selectable from config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyClass {
    Warrior,
    Mage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub name: String,
    pub class: EnemyClass,
    pub health: u32,
    pub attack: u32,
}

impl EnemyConfig {
    fn new(name: &str, class: EnemyClass, health: u32, attack: u32) -> Self {
        Self {
            name: name.to_string(),
            class,
            health,
            attack,
        }
    }

    pub fn build(&self) -> Character {
        match self.class {
            EnemyClass::Warrior => Character::warrior(self.name.clone(), self.health, self.attack),
            EnemyClass::Mage => Character::mage(self.name.clone(), self.health, self.attack),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub health: u32,
    pub attack: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            health: PLAYER_INITIAL_HEALTH,
            attack: PLAYER_INITIAL_ATTACK_POWER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemies: Vec<EnemyConfig>,
    pub xp_per_enemy: u32,
    pub item_drop_chance: f64,
    pub drop_item: String,
    /// Fixed RNG seed; None draws from the OS
    pub seed: Option<u64>,
    pub save_dir: PathBuf,
    pub save_key: String,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        let rewards = Rewards::default();
        Self {
            player: PlayerConfig::default(),
            enemies: vec![
                EnemyConfig::new("Dark Mage", EnemyClass::Mage, 50, 10),
                EnemyConfig::new("Shadow Wizard", EnemyClass::Mage, 70, 12),
            ],
            xp_per_enemy: XP_GAIN_PER_ENEMY,
            item_drop_chance: rewards.drop_chance,
            drop_item: rewards.drop_item,
            seed: None,
            save_dir: PathBuf::from("saves"),
            save_key: SAVE_KEY.to_string(),
            log_filter: "skirmish=info".to_string(),
        }
    }
}

impl GameConfig {
    /// Providers in priority order, without validation
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = match path {
            Some(path) => Toml::file_exact(path),
            None => Toml::file(DEFAULT_CONFIG_FILE),
        };

        Figment::from(Serialized::defaults(GameConfig::default()))
            .merge(file)
            .merge(Env::prefixed("SKIRMISH_").split("__"))
    }

    /// Load and validate. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }

        let config: GameConfig = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.health == 0 {
            return Err(ConfigError::Invalid("player health must be positive".into()));
        }
        if let Some(enemy) = self.enemies.iter().find(|e| e.health == 0) {
            return Err(ConfigError::Invalid(format!(
                "enemy '{}' must have positive health",
                enemy.name
            )));
        }
        if !(0.0..=1.0).contains(&self.item_drop_chance) {
            return Err(ConfigError::Invalid(format!(
                "item_drop_chance {} is outside 0..=1",
                self.item_drop_chance
            )));
        }
        validate_key(&self.save_key).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    pub fn build_player(&self) -> Character {
        Character::player(self.player.name.clone(), self.player.health, self.player.attack)
    }

    pub fn build_enemies(&self) -> Vec<Character> {
        self.enemies.iter().map(EnemyConfig::build).collect()
    }

    pub fn rewards(&self) -> Rewards {
        Rewards {
            xp_per_enemy: self.xp_per_enemy,
            drop_chance: self.item_drop_chance,
            drop_item: self.drop_item.clone(),
        }
    }

    pub fn dice(&self) -> Dice {
        Dice::from_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Battle;
    use figment::Jail;

    #[test]
    fn test_defaults_match_default_roster() {
        let config = GameConfig::default();
        assert_eq!(config.build_enemies(), Battle::default_roster());
        assert_eq!(config.rewards(), Rewards::default());
        assert_eq!(config.build_player(), Character::player("Hero", 100, 15));
        assert_eq!(config.save_key, "rpg_save");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = GameConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, GameConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_toml_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                seed = 42
                item_drop_chance = 1.0

                [player]
                name = "Aria"

                [[enemies]]
                name = "Orc"
                class = "warrior"
                health = 40
                attack = 8
                "#,
            )?;
            jail.set_env("SKIRMISH_PLAYER__ATTACK", "22");
            jail.set_env("SKIRMISH_SEED", "7");

            let config = GameConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.player.name, "Aria");
            assert_eq!(config.player.attack, 22);
            assert_eq!(config.player.health, 100);
            assert_eq!(config.seed, Some(7));
            assert_eq!(config.item_drop_chance, 1.0);
            assert_eq!(config.build_enemies(), vec![Character::warrior("Orc", 40, 8)]);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_must_exist() {
        Jail::expect_with(|_jail| {
            let err = GameConfig::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::MissingFile(_)));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.toml", "item_drop_chance = 1.5")?;
            let err = GameConfig::load(Some(Path::new("bad.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));

            jail.create_file("key.toml", r#"save_key = "../escape""#)?;
            let err = GameConfig::load(Some(Path::new("key.toml"))).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
            Ok(())
        });
    }
}
