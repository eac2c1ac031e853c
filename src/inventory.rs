//! Player inventory
//!
//! A bounded, ordered list of item names. Each known item is single-use and
//! applies its effect to the user or to the target.

use thiserror::Error;
use tracing::debug;

use crate::character::Character;
use crate::combat::{BuffKind, EffectKind};
use crate::rules::{
    ATTACK_BOOST_VALUE, HEALTH_POTION_HEAL_AMOUNT, INVENTORY_MAX_ITEMS, POISON_DART_DURATION,
};

/// Inventory errors. The message is what the player sees.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Inventory is full! Cannot add {0}.")]
    Full(String),

    #[error("Invalid item selection!")]
    InvalidSelection(usize),

    #[error("Invalid item effect!")]
    UnknownItem(String),
}

/// Items with a known use effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    /// Heals the user
    HealthPotion,
    /// Attack Boost buff on the user for one turn
    AttackBoost,
    /// Poisons the target
    PoisonDart,
}

impl Item {
    pub fn name(&self) -> &'static str {
        match self {
            Item::HealthPotion => "Health Potion",
            Item::AttackBoost => "Attack Boost",
            Item::PoisonDart => "Poison Dart",
        }
    }

    /// Look up an item by its exact name
    pub fn from_name(name: &str) -> Option<Item> {
        match name {
            "Health Potion" => Some(Item::HealthPotion),
            "Attack Boost" => Some(Item::AttackBoost),
            "Poison Dart" => Some(Item::PoisonDart),
            _ => None,
        }
    }

    /// Apply the item's effect, returning the use message
    fn apply(&self, actor: &mut Character, target: &mut Character) -> String {
        match self {
            Item::HealthPotion => {
                let healed = actor.heal(HEALTH_POTION_HEAL_AMOUNT);
                format!("Used {}. Health increased by {}!", self.name(), healed)
            }
            Item::AttackBoost => {
                actor.add_temporary_buff(BuffKind::AttackBoost, ATTACK_BOOST_VALUE);
                format!(
                    "Used {}. Attack power increased by {} for this turn!",
                    self.name(),
                    ATTACK_BOOST_VALUE
                )
            }
            Item::PoisonDart => {
                let poisoned = target.apply_status_effect(EffectKind::Poison, POISON_DART_DURATION);
                format!("Used {}. {}", self.name(), poisoned)
            }
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bounded item collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory holding the given items, up to capacity
    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .take(INVENTORY_MAX_ITEMS)
                .map(Into::into)
                .collect(),
        }
    }

    /// Append an item, failing when the inventory is full
    pub fn add_item(&mut self, item: impl Into<String>) -> Result<String, InventoryError> {
        let item = item.into();
        if self.items.len() >= INVENTORY_MAX_ITEMS {
            return Err(InventoryError::Full(item));
        }
        let message = format!("{} added to inventory!", item);
        self.items.push(item);
        Ok(message)
    }

    /// Use the item at `index`. It is removed only if its effect applied.
    pub fn use_item(
        &mut self,
        index: usize,
        actor: &mut Character,
        target: &mut Character,
    ) -> Result<String, InventoryError> {
        let name = self
            .items
            .get(index)
            .ok_or(InventoryError::InvalidSelection(index))?;
        let item = Item::from_name(name).ok_or_else(|| InventoryError::UnknownItem(name.clone()))?;

        let message = item.apply(actor, target);
        self.items.remove(index);
        debug!("{} used {}", actor.name(), item);

        Ok(message)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= INVENTORY_MAX_ITEMS
    }

    pub fn capacity(&self) -> usize {
        INVENTORY_MAX_ITEMS
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
