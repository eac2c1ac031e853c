//! Shared helpers for integration tests

#![allow(dead_code)]

use skirmish::combat::{Battle, PlayerAction, RandomSource, TurnReport};
use skirmish::Character;

pub fn hero() -> Character {
    Character::player("Hero", 100, 15)
}

pub fn brute(health: u32) -> Character {
    Character::warrior("Brute", health, 5)
}

/// Run turns chosen by `policy` until the battle ends or `max_turns` pass
pub fn play_out<R, F>(battle: &mut Battle, rng: &mut R, max_turns: usize, mut policy: F) -> Vec<TurnReport>
where
    R: RandomSource,
    F: FnMut(&Battle) -> PlayerAction,
{
    let mut reports = Vec::new();
    while !battle.is_over() && reports.len() < max_turns {
        let action = policy(battle);
        let report = battle
            .act(action, rng)
            .unwrap_or_else(|e| panic!("{:?} failed: {}", action, e));
        reports.push(report);
    }
    reports
}

/// Health bounds and inventory capacity for everyone in the battle
pub fn assert_invariants(battle: &Battle) {
    let player = battle.player();
    assert!(player.health() <= player.max_health(), "player over max health");
    if let Some(inventory) = player.inventory() {
        assert!(inventory.len() <= inventory.capacity(), "inventory over capacity");
    }
    for enemy in battle.enemies() {
        assert!(enemy.health() <= enemy.max_health(), "{} over max health", enemy.name());
        assert!(enemy.buffs().is_empty(), "{} kept buffs past turn-end", enemy.name());
    }
}
