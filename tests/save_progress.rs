//! Save and load through the file-backed store

mod common;

use common::{brute, hero, play_out};
use skirmish::combat::{Battle, PlayerAction, ScriptedDice};
use skirmish::save::{FileStore, KeyValueStore, SaveData, SaveError, SAVE_KEY};
use skirmish::Character;

/// Test: progress earned in battle survives a save and a fresh load
#[test]
fn test_battle_progress_round_trips_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();

    let mut battle = Battle::new(hero(), vec![brute(10), brute(10), brute(10)]);
    let mut rng = ScriptedDice::default();
    play_out(&mut battle, &mut rng, 10, |_| PlayerAction::Attack);
    let veteran = battle.into_player();
    assert_eq!(veteran.progression().unwrap().level(), 2);

    let report = veteran.save_progress(&mut store);
    assert!(report.success);
    assert_eq!(report.message, "Progress saved!");
    assert!(dir.path().join("rpg_save.json").exists());

    let mut loaded = Character::player("Newcomer", 100, 15);
    let report = loaded.load_progress(&store);
    assert_eq!(report.message, "Progress loaded successfully!");
    assert_eq!(
        SaveData::from_player(&loaded).unwrap(),
        SaveData::from_player(&veteran).unwrap()
    );
    assert_eq!(loaded.name(), "Hero");
    assert_eq!(loaded.max_health(), 120);
    assert_eq!(loaded.attack_power(), 20);
}

/// Test: the file on disk holds the flat camelCase record
#[test]
fn test_saved_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    hero().save_to(&mut store, "slot-1").unwrap();

    let raw = std::fs::read_to_string(dir.path().join("slot-1.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "Hero",
            "health": 100,
            "maxHealth": 100,
            "attackPower": 15,
            "level": 1,
            "experience": 0,
            "experienceToNextLevel": 50,
            "inventory": ["Health Potion", "Attack Boost"],
        })
    );
}

/// Test: missing and damaged saves are reported, not fatal
#[test]
fn test_missing_and_corrupt_saves() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let mut player = hero();

    assert_eq!(player.load_progress(&store).message, "No save file found.");

    store
        .set(SAVE_KEY, r#"{"name":"Hero","health":100}"#)
        .unwrap();
    assert_eq!(player.load_progress(&store).message, "Error loading progress!");
    assert!(matches!(
        player.load_from(&store, SAVE_KEY),
        Err(SaveError::Json(_))
    ));

    let six_items = r#"{"name":"Hero","health":100,"maxHealth":100,"attackPower":15,
        "level":1,"experience":0,"experienceToNextLevel":50,
        "inventory":["a","b","c","d","e","f"]}"#;
    store.set(SAVE_KEY, six_items).unwrap();
    assert!(matches!(
        player.load_from(&store, SAVE_KEY),
        Err(SaveError::Invalid(_))
    ));

    assert_eq!(player, hero());
}

/// Test: keys outside the allowed pattern never reach the filesystem
#[test]
fn test_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("saves")).unwrap();

    assert!(matches!(
        hero().save_to(&mut store, "../outside"),
        Err(SaveError::Store(_))
    ));
    assert!(!dir.path().join("outside.json").exists());
}

/// Test: stats at the top of the u32 range load and keep working in combat
#[test]
fn test_extreme_saved_stats_saturate() {
    let mut store = skirmish::MemoryStore::new();
    store
        .set(
            SAVE_KEY,
            r#"{"name":"Titan","health":4294967290,"maxHealth":4294967290,
                "attackPower":3000000000,"level":1,"experience":4294967290,
                "experienceToNextLevel":50,"inventory":[]}"#,
        )
        .unwrap();

    let mut player = hero();
    assert!(player.load_progress(&store).success);

    let mut target = brute(100);
    let outcome = player.special_move(&mut target).unwrap();
    assert_eq!(outcome.damage, u32::MAX);
    assert_eq!(target.health(), 0);

    let gain = player.gain_experience(20).unwrap();
    assert!(gain.leveled_up);
    let progression = player.progression().unwrap();
    assert_eq!(progression.level(), 2);
    assert_eq!(progression.experience(), u32::MAX - 50);
    assert_eq!(progression.experience_to_next_level(), 70);
    assert_eq!(player.max_health(), u32::MAX);
    assert_eq!(player.health(), u32::MAX);
    assert_eq!(player.attack_power(), 3_000_000_005);
}
