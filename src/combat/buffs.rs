//! Temporary buffs
//!
//! Single-turn modifiers that are cleared at every turn-end.

use serde::{Deserialize, Serialize};

/// Types of temporary buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffKind {
    /// Added to attack power for regular attacks
    AttackBoost,
    /// Added to defense when taking damage
    DefensiveStance,
}

impl std::fmt::Display for BuffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BuffKind::AttackBoost => "Attack Boost",
            BuffKind::DefensiveStance => "Defensive Stance",
        };
        write!(f, "{}", s)
    }
}

/// A buff with its value for the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporaryBuff {
    pub kind: BuffKind,
    pub value: u32,
}

/// Buffs on a single character, unique by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffs {
    buffs: Vec<TemporaryBuff>,
}

impl Buffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a buff, overwriting the value of an existing one of the same kind
    pub fn add(&mut self, kind: BuffKind, value: u32) {
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.kind == kind) {
            existing.value = value;
        } else {
            self.buffs.push(TemporaryBuff { kind, value });
        }
    }

    /// Sum of values for a buff kind (0 when absent)
    pub fn total(&self, kind: BuffKind) -> u32 {
        self.buffs
            .iter()
            .filter(|b| b.kind == kind)
            .fold(0, |total: u32, b| total.saturating_add(b.value))
    }

    pub fn has(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemporaryBuff> {
        self.buffs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_overwrites_value() {
        let mut buffs = Buffs::new();
        buffs.add(BuffKind::AttackBoost, 10);
        buffs.add(BuffKind::AttackBoost, 4);

        assert_eq!(buffs.iter().count(), 1);
        assert_eq!(buffs.total(BuffKind::AttackBoost), 4);
    }

    #[test]
    fn test_total_by_kind() {
        let mut buffs = Buffs::new();
        buffs.add(BuffKind::AttackBoost, 10);
        buffs.add(BuffKind::DefensiveStance, 5);

        assert_eq!(buffs.total(BuffKind::AttackBoost), 10);
        assert_eq!(buffs.total(BuffKind::DefensiveStance), 5);

        buffs.clear();
        assert!(buffs.is_empty());
        assert_eq!(buffs.total(BuffKind::DefensiveStance), 0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BuffKind::AttackBoost.to_string(), "Attack Boost");
        assert_eq!(BuffKind::DefensiveStance.to_string(), "Defensive Stance");
    }
}
