//! skirmish - turn-based RPG combat engine
//!
//! Character state, combat resolution, status effects, inventory, leveling
//! and enemy AI. Rendering and menus are left to the caller, which drives a
//! [`combat::Battle`] and shows its log.

pub mod character;
pub mod combat;
pub mod config;
pub mod inventory;
pub mod rules;
pub mod save;

pub use character::{ActionError, Character, Class};
pub use combat::{Battle, BattleStatus, Dice, PlayerAction, RandomSource, TurnReport};
pub use config::GameConfig;
pub use inventory::{Inventory, InventoryError, Item};
pub use save::{FileStore, KeyValueStore, MemoryStore, ProgressReport, SaveData, SaveError};
