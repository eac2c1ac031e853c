//! Battle session
//!
//! Runs the turn cycle between the player and an ordered roster of enemies:
//! - Player action, then the player's cooldown and turn-end effects
//! - Enemy defeat rewards (experience, a chance at a bonus item)
//! - Enemy decision, mana regeneration, cooldown and turn-end effects
//! - Victory when the roster is exhausted, defeat when the player falls

use tracing::{debug, info, warn};

use super::dice::RandomSource;
use crate::character::{ActionError, Character};
use crate::rules::XP_GAIN_PER_ENEMY;

/// Probability that a defeated enemy drops the bonus item
pub const DEFAULT_DROP_CHANCE: f64 = 0.5;
/// Item dropped by defeated enemies
pub const DEFAULT_DROP_ITEM: &str = "Poison Dart";

/// An action chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Attack,
    Special,
    Defend,
    /// Use the inventory item at this index
    UseItem(usize),
}

/// Where the battle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleStatus {
    /// Waiting for the player's next action
    PlayerTurn,
    Victory,
    Defeat,
}

impl BattleStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, BattleStatus::PlayerTurn)
    }
}

/// Everything that happened during one turn cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Log lines added during this turn, in order
    pub messages: Vec<String>,
    /// Status after the turn
    pub status: BattleStatus,
    /// Whether the player leveled up this turn
    pub leveled_up: bool,
}

/// Rewards handed out when an enemy falls
#[derive(Debug, Clone, PartialEq)]
pub struct Rewards {
    pub xp_per_enemy: u32,
    pub drop_chance: f64,
    pub drop_item: String,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            xp_per_enemy: XP_GAIN_PER_ENEMY,
            drop_chance: DEFAULT_DROP_CHANCE,
            drop_item: DEFAULT_DROP_ITEM.to_string(),
        }
    }
}

/// A battle between one player and a queue of enemies
#[derive(Debug, Clone)]
pub struct Battle {
    player: Character,
    enemies: Vec<Character>,
    current: usize,
    status: BattleStatus,
    rewards: Rewards,
    log: Vec<String>,
}

impl Battle {
    /// Start a battle. An empty roster is an immediate victory.
    pub fn new(player: Character, enemies: Vec<Character>) -> Self {
        Self::with_rewards(player, enemies, Rewards::default())
    }

    pub fn with_rewards(player: Character, enemies: Vec<Character>, rewards: Rewards) -> Self {
        let status = if enemies.is_empty() {
            BattleStatus::Victory
        } else {
            BattleStatus::PlayerTurn
        };

        Self {
            player,
            enemies,
            current: 0,
            status,
            rewards,
            log: vec!["Battle begins!".to_string()],
        }
    }

    /// The two Mages every new game starts against
    pub fn default_roster() -> Vec<Character> {
        vec![
            Character::mage("Dark Mage", 50, 10),
            Character::mage("Shadow Wizard", 70, 12),
        ]
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Character {
        &mut self.player
    }

    /// Take the player back, e.g. to save progress after the battle
    pub fn into_player(self) -> Character {
        self.player
    }

    /// The enemy currently being fought
    pub fn current_enemy(&self) -> Option<&Character> {
        self.enemies.get(self.current)
    }

    pub fn current_enemy_index(&self) -> usize {
        self.current
    }

    pub fn enemies(&self) -> &[Character] {
        &self.enemies
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Full battle log
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Run one full turn cycle starting with the player's action.
    ///
    /// A failed action (special on cooldown, bad item) leaves the battle
    /// untouched and the player may choose again.
    pub fn act<R>(&mut self, action: PlayerAction, rng: &mut R) -> Result<TurnReport, ActionError>
    where
        R: RandomSource + ?Sized,
    {
        if self.status.is_over() {
            return Err(ActionError::BattleOver);
        }
        let Some(enemy) = self.enemies.get_mut(self.current) else {
            return Err(ActionError::BattleOver);
        };

        let message = match action {
            PlayerAction::Attack => self.player.attack(enemy).log_line(),
            PlayerAction::Special => self.player.special_move(enemy)?.log_line(),
            PlayerAction::Defend => self.player.defend().log_line(),
            PlayerAction::UseItem(index) => self.player.use_item(index, enemy)?,
        };
        debug!("{} performs {:?}", self.player.name(), action);

        let mut turn = Turn::default();
        turn.push(message);

        self.player.reduce_cooldown();
        turn.extend(self.player.update_effects());

        if self.enemies[self.current].is_alive() {
            self.enemy_turn(&mut turn, rng);
        } else {
            self.resolve_enemy_defeat(&mut turn, rng);
        }

        self.check_player_defeat(&mut turn);
        Ok(self.finish(turn))
    }

    fn enemy_turn<R>(&mut self, turn: &mut Turn, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        turn.push("Enemy's turn...");

        let enemy = &mut self.enemies[self.current];
        match enemy.make_decision(&mut self.player, rng) {
            Ok(action) => turn.push(action.log_line()),
            Err(e) => warn!("{} skips its turn: {}", enemy.name(), e),
        }

        enemy.regenerate_mana();
        enemy.reduce_cooldown();
        turn.extend(enemy.update_effects());

        if !enemy.is_alive() {
            turn.push(format!("{} has been defeated!", enemy.name()));
            self.resolve_enemy_defeat(turn, rng);
        }
    }

    /// A fallen player loses unless the last enemy fell first
    fn check_player_defeat(&mut self, turn: &mut Turn) {
        if !self.player.is_alive() && !self.status.is_over() {
            turn.push("💀 Game Over! You have been defeated...");
            self.status = BattleStatus::Defeat;
            info!("{} was defeated", self.player.name());
        }
    }

    /// Experience, bonus item, then the next enemy or victory
    fn resolve_enemy_defeat<R>(&mut self, turn: &mut Turn, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        match self.player.gain_experience(self.rewards.xp_per_enemy) {
            Ok(gain) => {
                turn.leveled_up |= gain.leveled_up;
                turn.push(gain.message);
            }
            Err(e) => debug!("No experience awarded: {}", e),
        }

        if rng.chance(self.rewards.drop_chance) {
            if let Some(inventory) = self.player.inventory_mut() {
                let message = match inventory.add_item(self.rewards.drop_item.clone()) {
                    Ok(message) => message,
                    Err(e) => e.to_string(),
                };
                turn.push(message);
            }
        }

        if self.current + 1 >= self.enemies.len() {
            self.status = BattleStatus::Victory;
            turn.push("🎉 Victory! You have defeated all enemies!");
            info!("{} defeated all enemies", self.player.name());
        } else {
            self.current += 1;
            let next = self.enemies[self.current].name().to_string();
            info!("Next enemy: {}", next);
            turn.push(format!("Next enemy approaches: {}", next));
        }
    }

    fn finish(&mut self, turn: Turn) -> TurnReport {
        self.log.extend(turn.messages.iter().cloned());
        TurnReport {
            messages: turn.messages,
            status: self.status,
            leveled_up: turn.leveled_up,
        }
    }
}

/// Messages collected while a turn is in progress
#[derive(Debug, Default)]
struct Turn {
    messages: Vec<String>,
    leveled_up: bool,
}

impl Turn {
    fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    fn extend(&mut self, messages: Vec<String>) {
        self.messages.extend(messages);
    }
}
