//! Player progression: experience, leveling, stat growth

use tracing::info;

use super::{ActionError, Character, Class};
use crate::combat::{Buffs, StatusEffects};
use crate::inventory::Inventory;
use crate::rules::{
    ATTACK_INCREASE_PER_LEVEL, HEALTH_INCREASE_PER_LEVEL, PLAYER_INITIAL_ATTACK_POWER,
    PLAYER_INITIAL_HEALTH, PLAYER_INITIAL_XP_TO_LEVEL, XP_INCREASE_PER_LEVEL,
};

/// Items every new or reset player carries
pub const STARTING_ITEMS: [&str; 2] = ["Health Potion", "Attack Boost"];

/// Level, experience and inventory of a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    pub(crate) level: u32,
    pub(crate) experience: u32,
    pub(crate) experience_to_next_level: u32,
    pub(crate) inventory: Inventory,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Level 1 with the starting inventory
    pub fn new() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next_level: PLAYER_INITIAL_XP_TO_LEVEL,
            inventory: Inventory::with_items(STARTING_ITEMS),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_to_next_level
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Progress toward the next level, 0-100
    pub fn experience_percentage(&self) -> f64 {
        f64::from(self.experience) * 100.0 / f64::from(self.experience_to_next_level)
    }
}

/// Result of an experience gain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceGain {
    pub leveled_up: bool,
    pub message: String,
}

impl Character {
    /// Add experience, leveling up at most once per call.
    ///
    /// Leftover experience carries over even when it exceeds the next
    /// threshold; the next gain triggers the following level.
    pub fn gain_experience(&mut self, xp: u32) -> Result<ExperienceGain, ActionError> {
        let Class::Player(progression) = &mut self.class else {
            return Err(ActionError::NotAPlayer(self.name.clone()));
        };

        progression.experience = progression.experience.saturating_add(xp);
        let mut message = format!("{} gains {} XP!", self.name, xp);

        if progression.experience < progression.experience_to_next_level {
            return Ok(ExperienceGain {
                leveled_up: false,
                message,
            });
        }

        progression.level = progression.level.saturating_add(1);
        progression.experience -= progression.experience_to_next_level;
        progression.experience_to_next_level = progression
            .experience_to_next_level
            .saturating_add(XP_INCREASE_PER_LEVEL);
        let level = progression.level;

        self.max_health = self.max_health.saturating_add(HEALTH_INCREASE_PER_LEVEL);
        self.health = self.max_health;
        self.set_attack_power(self.attack_power.saturating_add(ATTACK_INCREASE_PER_LEVEL));

        info!("{} reached level {}", self.name, level);
        message.push_str(&format!(
            " Congratulations! {} has leveled up to Level {}!",
            self.name, level
        ));

        Ok(ExperienceGain {
            leveled_up: true,
            message,
        })
    }

    /// Restore a player to starting stats, level and inventory
    pub fn reset(&mut self) -> Result<(), ActionError> {
        let Class::Player(progression) = &mut self.class else {
            return Err(ActionError::NotAPlayer(self.name.clone()));
        };
        *progression = Progression::new();

        self.health = PLAYER_INITIAL_HEALTH;
        self.max_health = PLAYER_INITIAL_HEALTH;
        self.attack_power = PLAYER_INITIAL_ATTACK_POWER;
        self.special_cooldown = 0;
        self.defense = 0;
        self.status_effects = StatusEffects::new();
        self.buffs = Buffs::new();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::BuffKind;

    fn hero() -> Character {
        Character::player("Hero", PLAYER_INITIAL_HEALTH, PLAYER_INITIAL_ATTACK_POWER)
    }

    #[test]
    fn test_new_player() {
        let player = hero();
        let progression = player.progression().unwrap();

        assert_eq!(progression.level(), 1);
        assert_eq!(progression.experience(), 0);
        assert_eq!(progression.experience_to_next_level(), 50);
        assert_eq!(progression.inventory().items(), STARTING_ITEMS);
    }

    #[test]
    fn test_gain_without_level_up() {
        let mut player = hero();
        let gain = player.gain_experience(20).unwrap();

        assert!(!gain.leveled_up);
        assert_eq!(gain.message, "Hero gains 20 XP!");
        assert_eq!(player.progression().unwrap().experience(), 20);
        assert_eq!(player.progression().unwrap().experience_percentage(), 40.0);
    }

    #[test]
    fn test_level_up_carries_remainder() {
        let mut player = hero();
        player.gain_experience(45).unwrap();
        player.take_damage(40);

        let gain = player.gain_experience(10).unwrap();
        assert!(gain.leveled_up);
        assert_eq!(
            gain.message,
            "Hero gains 10 XP! Congratulations! Hero has leveled up to Level 2!"
        );

        let progression = player.progression().unwrap();
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.experience(), 5);
        assert_eq!(progression.experience_to_next_level(), 70);
        assert_eq!(player.max_health(), 120);
        assert_eq!(player.health(), 120);
        assert_eq!(player.attack_power(), 20);
    }

    #[test]
    fn test_single_level_per_gain() {
        let mut player = hero();

        // Spans two thresholds (50 + 70) but only advances one level
        player.gain_experience(130).unwrap();
        let progression = player.progression().unwrap();
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.experience(), 80);
        assert_eq!(progression.experience_to_next_level(), 70);

        // Next gain picks up the pending level
        assert!(player.gain_experience(0).unwrap().leveled_up);
        assert_eq!(player.progression().unwrap().level(), 3);
    }

    #[test]
    fn test_experience_saturates() {
        let mut player = hero();
        if let Class::Player(progression) = &mut player.class {
            progression.experience = u32::MAX - 5;
            progression.experience_to_next_level = u32::MAX - 10;
        }
        player.max_health = u32::MAX - 1;

        assert!(player.gain_experience(100).unwrap().leveled_up);
        let progression = player.progression().unwrap();
        assert_eq!(progression.experience(), 10);
        assert_eq!(progression.experience_to_next_level(), u32::MAX);
        assert_eq!(player.max_health(), u32::MAX);
    }

    #[test]
    fn test_reset() {
        let mut player = hero();
        player.gain_experience(60).unwrap();
        player.apply_status_effect("Poison", 3);
        player.add_temporary_buff(BuffKind::AttackBoost, 10);
        player.set_special_cooldown(2);
        player.inventory_mut().unwrap().clear();

        player.reset().unwrap();

        assert_eq!(player.health(), 100);
        assert_eq!(player.max_health(), 100);
        assert_eq!(player.attack_power(), 15);
        assert_eq!(player.special_cooldown(), 0);
        assert!(player.status_effects().is_empty());
        assert!(player.buffs().is_empty());
        assert_eq!(player.progression(), Some(&Progression::new()));
    }

    #[test]
    fn test_non_player_cannot_level() {
        let mut mage = Character::mage("Dark Mage", 50, 10);
        assert!(mage.gain_experience(100).is_err());
        assert!(mage.reset().is_err());
    }
}
