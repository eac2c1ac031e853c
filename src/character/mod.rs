//! Characters and their combat primitives
//!
//! One [`Character`] record covers every combatant. The [`Class`] tag selects
//! the special move and AI profile and carries class-specific state:
//! - Warrior: nothing extra
//! - Mage: mana, spent on Fireball and regenerated each turn
//! - Player: a Warrior with progression and an inventory

mod progression;

pub use progression::{ExperienceGain, Progression};

use thiserror::Error;
use tracing::debug;

use crate::combat::{mitigate, ActionOutcome, BuffKind, Buffs, EffectKind, StatusEffect, StatusEffects};
use crate::inventory::{Inventory, InventoryError};
use crate::rules::{
    DEFENSE_BONUS_FROM_DEFEND, DEFENSIVE_STANCE_BUFF_VALUE, FIREBALL_BONUS_DAMAGE,
    FIREBALL_BURN_DURATION, MAGE_MANA_COST_FIREBALL, MAGE_MANA_REGEN_PER_TURN,
    MAGE_SPECIAL_COOLDOWN, MAX_MANA, WARRIOR_SPECIAL_COOLDOWN,
};

/// Errors from character actions. The message is what the player sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Special move is on cooldown for {0} more turns!")]
    SpecialOnCooldown(u32),

    #[error("{0} is controlled by the player")]
    PlayerControlled(String),

    #[error("{0} is not a player character")]
    NotAPlayer(String),

    #[error("{0}")]
    Item(#[from] InventoryError),

    #[error("The battle is already over")]
    BattleOver,
}

/// Character class and class-specific state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Class {
    Warrior,
    Mage { mana: u32 },
    Player(Progression),
}

impl Class {
    pub fn label(&self) -> &'static str {
        match self {
            Class::Warrior => "Warrior",
            Class::Mage { .. } => "Mage",
            Class::Player(_) => "Player",
        }
    }
}

/// A combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub(crate) name: String,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) attack_power: u32,
    pub(crate) defense: u32,
    pub(crate) special_cooldown: u32,
    pub(crate) status_effects: StatusEffects,
    pub(crate) buffs: Buffs,
    pub(crate) class: Class,
}

impl Character {
    fn new(name: impl Into<String>, health: u32, attack_power: u32, class: Class) -> Self {
        Self {
            name: name.into(),
            health,
            max_health: health.max(1),
            attack_power,
            defense: 0,
            special_cooldown: 0,
            status_effects: StatusEffects::new(),
            buffs: Buffs::new(),
            class,
        }
    }

    pub fn warrior(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self::new(name, health, attack_power, Class::Warrior)
    }

    /// A Mage starts with full mana
    pub fn mage(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self::new(name, health, attack_power, Class::Mage { mana: MAX_MANA })
    }

    /// A Player starts at level 1 with the starting inventory
    pub fn player(name: impl Into<String>, health: u32, attack_power: u32) -> Self {
        Self::new(name, health, attack_power, Class::Player(Progression::new()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack_power(&self) -> u32 {
        self.attack_power
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn special_cooldown(&self) -> u32 {
        self.special_cooldown
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status_effects
    }

    pub fn buffs(&self) -> &Buffs {
        &self.buffs
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_player(&self) -> bool {
        matches!(self.class, Class::Player(_))
    }

    /// Set health, clamped to [0, max_health]
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Set attack power; zero is ignored
    pub fn set_attack_power(&mut self, attack_power: u32) {
        if attack_power > 0 {
            self.attack_power = attack_power;
        }
    }

    /// Heal by up to `amount`, returning the health actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.set_health(self.health.saturating_add(amount));
        self.health - before
    }

    /// Current mana for a Mage
    pub fn mana(&self) -> Option<u32> {
        match self.class {
            Class::Mage { mana } => Some(mana),
            _ => None,
        }
    }

    pub fn mana_percentage(&self) -> Option<f64> {
        self.mana()
            .map(|mana| f64::from(mana) * 100.0 / f64::from(MAX_MANA))
    }

    /// Restore mana at the end of a Mage's turn; no-op for other classes
    pub fn regenerate_mana(&mut self) {
        if let Class::Mage { mana } = &mut self.class {
            *mana = mana.saturating_add(MAGE_MANA_REGEN_PER_TURN).min(MAX_MANA);
        }
    }

    pub fn progression(&self) -> Option<&Progression> {
        match &self.class {
            Class::Player(progression) => Some(progression),
            _ => None,
        }
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.progression().map(|p| &p.inventory)
    }

    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        match &mut self.class {
            Class::Player(progression) => Some(&mut progression.inventory),
            _ => None,
        }
    }

    /// Attack power plus any Attack Boost
    pub fn total_attack(&self) -> u32 {
        self.attack_power
            .saturating_add(self.buffs.total(BuffKind::AttackBoost))
    }

    /// Defense plus any Defensive Stance
    pub fn total_defense(&self) -> u32 {
        self.defense
            .saturating_add(self.buffs.total(BuffKind::DefensiveStance))
    }

    /// Regular attack
    pub fn attack(&self, opponent: &mut Character) -> ActionOutcome {
        let damage = opponent.take_damage(self.total_attack());
        ActionOutcome::hit(
            damage,
            format!("{} attacks {} for {} damage!", self.name, opponent.name, damage),
        )
    }

    /// Take damage after defense, returning the damage actually taken
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = mitigate(amount, self.total_defense());
        self.health = self.health.saturating_sub(actual);
        actual
    }

    /// Raise defense until the next turn-end
    pub fn defend(&mut self) -> ActionOutcome {
        self.defense = DEFENSE_BONUS_FROM_DEFEND;
        self.add_temporary_buff(BuffKind::DefensiveStance, DEFENSIVE_STANCE_BUFF_VALUE);
        ActionOutcome::message(format!(
            "{} assumes a defensive stance, reducing incoming damage!",
            self.name
        ))
    }

    /// Apply a status effect, replacing any existing one of the same name
    pub fn apply_status_effect(&mut self, effect: impl Into<EffectKind>, duration: u32) -> String {
        let kind = effect.into();
        let message = format!(
            "{} is affected by {} for {} turns!",
            self.name, kind, duration
        );
        self.status_effects.apply(StatusEffect::new(kind, duration));
        message
    }

    pub fn remove_status_effect(&mut self, effect: impl Into<EffectKind>) {
        self.status_effects.remove(&effect.into());
    }

    pub fn add_temporary_buff(&mut self, kind: BuffKind, value: u32) {
        self.buffs.add(kind, value);
    }

    /// "Poison(3), Burn(2)" or "None"
    pub fn status_effects_display(&self) -> String {
        self.status_effects.display()
    }

    /// Turn-end processing: tick status effects, then drop buffs and defense.
    /// Must run exactly once per character per full turn cycle.
    pub fn update_effects(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        let mut remaining = Vec::new();

        for mut effect in self.status_effects.take() {
            if let Some(damage) = effect.tick() {
                let taken = self.take_damage(damage);
                debug!("{} ticks {} for {} ({} after defense)", self.name, effect.kind, damage, taken);
                messages.push(format!(
                    "{} takes {} {} damage!",
                    self.name,
                    damage,
                    effect.kind.damage_noun()
                ));
            }

            if effect.is_expired() {
                messages.push(format!(
                    "{} is no longer affected by {}!",
                    self.name, effect.kind
                ));
            } else {
                remaining.push(effect);
            }
        }

        self.status_effects.replace(remaining);
        self.buffs.clear();
        self.defense = 0;

        messages
    }

    pub fn reduce_cooldown(&mut self) {
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
    }

    pub fn can_use_special_move(&self) -> bool {
        self.special_cooldown == 0
    }

    pub fn set_special_cooldown(&mut self, turns: u32) {
        self.special_cooldown = turns;
    }

    /// Damage the special move deals before the target's defense, capped at `u32::MAX`
    pub fn special_damage(&self) -> u32 {
        match self.class {
            Class::Mage { .. } => self.attack_power.saturating_add(FIREBALL_BONUS_DAMAGE),
            Class::Warrior | Class::Player(_) => self.attack_power.saturating_mul(2),
        }
    }

    /// Special move ready, and for a Mage, enough mana for Fireball
    pub fn special_ready(&self) -> bool {
        match self.class {
            Class::Mage { mana } => self.can_use_special_move() && mana >= MAGE_MANA_COST_FIREBALL,
            _ => self.can_use_special_move(),
        }
    }

    /// Class special move: Heavy Strike for Warriors and Players, Fireball for Mages
    pub fn special_move(&mut self, opponent: &mut Character) -> Result<ActionOutcome, ActionError> {
        if !self.can_use_special_move() {
            return Err(ActionError::SpecialOnCooldown(self.special_cooldown));
        }

        let damage = opponent.take_damage(self.special_damage());

        let outcome = match &mut self.class {
            Class::Mage { mana } => {
                *mana = mana.saturating_sub(MAGE_MANA_COST_FIREBALL);
                let burn = opponent.apply_status_effect(EffectKind::Burn, FIREBALL_BURN_DURATION);
                self.special_cooldown = MAGE_SPECIAL_COOLDOWN;
                ActionOutcome::hit(
                    damage,
                    format!(
                        "{} casts Fireball on {} for {} damage!",
                        self.name, opponent.name, damage
                    ),
                )
                .with_effect(burn)
            }
            Class::Warrior | Class::Player(_) => {
                self.special_cooldown = WARRIOR_SPECIAL_COOLDOWN;
                ActionOutcome::hit(
                    damage,
                    format!(
                        "{} performs a Heavy Strike on {} for {} damage!",
                        self.name, opponent.name, damage
                    ),
                )
            }
        };

        Ok(outcome)
    }

    /// Use an item from this player's inventory
    pub fn use_item(&mut self, index: usize, target: &mut Character) -> Result<String, ActionError> {
        let Class::Player(progression) = &mut self.class else {
            return Err(ActionError::NotAPlayer(self.name.clone()));
        };

        // The inventory is moved out while its item acts on its owner
        let mut inventory = std::mem::take(&mut progression.inventory);
        let result = inventory.use_item(index, self, target);
        if let Class::Player(progression) = &mut self.class {
            progression.inventory = inventory;
        }

        Ok(result?)
    }
}
