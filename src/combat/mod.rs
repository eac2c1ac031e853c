//! Combat system module
//!
//! Implements turn-based combat with:
//! - Flat damage mitigation by defense
//! - Status effects (Poison, Burn) ticking at turn-end
//! - Single-turn buffs (Attack Boost, Defensive Stance)
//! - Probability-weighted enemy decisions over an injected random source
//! - Battle sessions running the full turn cycle

mod ai;
mod battle;
mod buffs;
mod damage;
mod dice;
mod effects;

pub use ai::{AiProfile, Decision, EnemyAction};
pub use battle::{Battle, BattleStatus, PlayerAction, Rewards, TurnReport};
pub use buffs::{BuffKind, Buffs, TemporaryBuff};
pub use damage::{mitigate, ActionOutcome};
pub use dice::{Dice, RandomSource, ScriptedDice};
pub use effects::{EffectKind, StatusEffect, StatusEffects};
