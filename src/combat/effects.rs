//! Status effects system
//!
//! Manages timed conditions on a character:
//! - Poison and Burn deal damage at every turn-end
//! - Any other named effect just counts down
//! - One instance per name; reapplying replaces the old one

use serde::{Deserialize, Serialize};

use crate::rules::{BURN_DAMAGE_PER_TURN, POISON_DAMAGE_PER_TURN};

/// Kinds of status effects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Poisoned - takes damage each turn-end
    Poison,
    /// Burning - takes fire damage each turn-end
    Burn,
    /// Any other effect; tracked for its duration only
    Named(String),
}

/// Exact, case-sensitive names; anything else is kept verbatim as `Named`
impl From<&str> for EffectKind {
    fn from(s: &str) -> Self {
        match s {
            "Poison" => EffectKind::Poison,
            "Burn" => EffectKind::Burn,
            _ => EffectKind::Named(s.to_string()),
        }
    }
}

impl EffectKind {
    /// Damage dealt at each turn-end, if this is a damage-over-time effect
    pub fn damage_per_turn(&self) -> Option<u32> {
        match self {
            EffectKind::Poison => Some(POISON_DAMAGE_PER_TURN),
            EffectKind::Burn => Some(BURN_DAMAGE_PER_TURN),
            EffectKind::Named(_) => None,
        }
    }

    /// Lowercase noun used in tick messages ("poison damage")
    pub fn damage_noun(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::Poison => write!(f, "Poison"),
            EffectKind::Burn => write!(f, "Burn"),
            EffectKind::Named(name) => write!(f, "{}", name),
        }
    }
}

/// A status effect instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEffect {
    /// Type of effect
    pub kind: EffectKind,
    /// Turn-ends left before the effect is removed
    pub remaining_turns: u32,
}

impl StatusEffect {
    /// Create a new status effect
    pub fn new(kind: EffectKind, duration: u32) -> Self {
        Self {
            kind,
            remaining_turns: duration,
        }
    }

    /// Tick the effect, returning damage to apply if it deals any
    pub fn tick(&mut self) -> Option<u32> {
        self.remaining_turns = self.remaining_turns.saturating_sub(1);
        self.kind.damage_per_turn()
    }

    /// Check if effect has expired
    pub fn is_expired(&self) -> bool {
        self.remaining_turns == 0
    }
}

/// Effects on a single character, in application order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Create new empty effects
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an effect, replacing any existing effect of the same kind.
    /// A zero duration removes the effect instead.
    pub fn apply(&mut self, effect: StatusEffect) {
        self.remove(&effect.kind);
        if !effect.is_expired() {
            self.effects.push(effect);
        }
    }

    /// Remove an effect by kind
    pub fn remove(&mut self, kind: &EffectKind) {
        self.effects.retain(|e| &e.kind != kind);
    }

    /// Check if character has a specific effect
    pub fn has(&self, kind: &EffectKind) -> bool {
        self.effects.iter().any(|e| &e.kind == kind)
    }

    /// Get an effect if present
    pub fn get(&self, kind: &EffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| &e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Clear all effects
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Summary like "Poison(3), Burn(2)", or "None"
    pub fn display(&self) -> String {
        if self.effects.is_empty() {
            return "None".to_string();
        }
        self.effects
            .iter()
            .map(|e| format!("{}({})", e.kind, e.remaining_turns))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Take every effect out, leaving the set empty
    pub(crate) fn take(&mut self) -> Vec<StatusEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Install a recomputed effect list
    pub(crate) fn replace(&mut self, effects: Vec<StatusEffect>) {
        self.effects = effects;
    }
}
