//! Enemy decision-making
//!
//! A probability-weighted decision tree shared by every computer-controlled
//! class, tuned per class by an [`AiProfile`]:
//! 1. Below a third of max health, defend with `low_health_defend` probability
//! 2. With the special ready, use it when it would drop the opponent or with
//!    `special_chance` probability, otherwise attack
//! 3. With the special unavailable, defend with `fallback_defend` probability,
//!    otherwise attack

use tracing::debug;

use super::damage::ActionOutcome;
use super::dice::RandomSource;
use crate::character::{ActionError, Character, Class};

/// What the enemy chose to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Attack,
    Special,
    Defend,
}

/// Probabilities for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    pub low_health_defend: f64,
    pub special_chance: f64,
    pub fallback_defend: f64,
}

impl AiProfile {
    pub const WARRIOR: AiProfile = AiProfile {
        low_health_defend: 0.6,
        special_chance: 0.3,
        fallback_defend: 0.2,
    };

    pub const MAGE: AiProfile = AiProfile {
        low_health_defend: 0.7,
        special_chance: 0.4,
        fallback_defend: 0.2,
    };

    /// Profile for a class; players have none
    pub fn for_class(class: &Class) -> Option<AiProfile> {
        match class {
            Class::Warrior => Some(Self::WARRIOR),
            Class::Mage { .. } => Some(Self::MAGE),
            Class::Player(_) => None,
        }
    }
}

/// A decision together with its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyAction {
    pub decision: Decision,
    pub outcome: ActionOutcome,
}

impl EnemyAction {
    /// Battle log line for this action
    pub fn log_line(&self) -> String {
        self.outcome.log_line()
    }
}

impl Character {
    /// Pick an action against `opponent` without performing it
    pub fn choose_action<R>(&self, opponent: &Character, rng: &mut R) -> Result<Decision, ActionError>
    where
        R: RandomSource + ?Sized,
    {
        let profile = AiProfile::for_class(&self.class)
            .ok_or_else(|| ActionError::PlayerControlled(self.name.clone()))?;

        let low_health = u64::from(self.health) * 3 < u64::from(self.max_health);
        if low_health && rng.chance(profile.low_health_defend) {
            return Ok(Decision::Defend);
        }

        if self.special_ready() {
            // Lethal check comes first so no roll is spent on a sure kill
            if opponent.health() <= self.special_damage() || rng.chance(profile.special_chance) {
                Ok(Decision::Special)
            } else {
                Ok(Decision::Attack)
            }
        } else if rng.chance(profile.fallback_defend) {
            Ok(Decision::Defend)
        } else {
            Ok(Decision::Attack)
        }
    }

    /// Choose and perform an enemy action
    pub fn make_decision<R>(
        &mut self,
        opponent: &mut Character,
        rng: &mut R,
    ) -> Result<EnemyAction, ActionError>
    where
        R: RandomSource + ?Sized,
    {
        let decision = self.choose_action(opponent, rng)?;
        debug!("{} decides to {:?}", self.name, decision);

        let outcome = match decision {
            Decision::Attack => self.attack(opponent),
            Decision::Special => self.special_move(opponent)?,
            Decision::Defend => self.defend(),
        };

        Ok(EnemyAction { decision, outcome })
    }
}
