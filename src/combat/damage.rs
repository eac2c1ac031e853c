//! Damage mitigation and action results

/// Damage left after flat defense, never below zero
pub fn mitigate(amount: u32, defense: u32) -> u32 {
    amount.saturating_sub(defense)
}

/// Result of a combat action, ready for the UI to render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Damage actually dealt to the target (0 for non-damaging actions)
    pub damage: u32,
    /// Primary message
    pub message: String,
    /// Secondary-effect messages, in the order they happened
    pub effects: Vec<String>,
}

impl ActionOutcome {
    /// Outcome of a damaging action
    pub fn hit(damage: u32, message: impl Into<String>) -> Self {
        Self {
            damage,
            message: message.into(),
            effects: Vec::new(),
        }
    }

    /// Outcome that only produces a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::hit(0, message)
    }

    /// Attach a secondary-effect message
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Message followed by its secondary effects, as one battle log line
    pub fn log_line(&self) -> String {
        if self.effects.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.effects.join(" "))
        }
    }
}
