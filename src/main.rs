//! skirmish - play a battle from the command line
//!
//! The player side is driven by a fixed policy; the battle log is printed as
//! it happens. Progress can be loaded before and saved after the battle.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish::combat::{Battle, EffectKind, PlayerAction};
use skirmish::inventory::Item;
use skirmish::save::FileStore;
use skirmish::GameConfig;

/// Turn-based RPG battle runner
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about = "Play a turn-based RPG battle")]
struct Args {
    /// TOML config file (defaults to ./skirmish.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player name, overriding the config
    #[arg(short, long)]
    name: Option<String>,

    /// RNG seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Load saved progress before the battle
    #[arg(long)]
    load: bool,

    /// Save progress after the battle
    #[arg(long)]
    save: bool,

    /// Stop after this many player turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,
}

/// Potion when low, then special, then a dart on an unpoisoned enemy
fn choose_action(battle: &Battle) -> PlayerAction {
    let player = battle.player();
    let Some(inventory) = player.inventory() else {
        return PlayerAction::Attack;
    };
    let slot_of = |item: Item| inventory.items().iter().position(|name| name == item.name());

    if player.health().saturating_mul(2) < player.max_health() {
        if let Some(index) = slot_of(Item::HealthPotion) {
            return PlayerAction::UseItem(index);
        }
    }

    if player.can_use_special_move() {
        return PlayerAction::Special;
    }

    let enemy_poisoned = battle
        .current_enemy()
        .is_some_and(|enemy| enemy.status_effects().has(&EffectKind::Poison));
    if !enemy_poisoned {
        if let Some(index) = slot_of(Item::PoisonDart) {
            return PlayerAction::UseItem(index);
        }
    }

    PlayerAction::Attack
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = GameConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(name) = args.name {
        config.player.name = name;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut store = if args.load || args.save {
        let store = FileStore::open(&config.save_dir).with_context(|| {
            format!("Failed to open save directory {}", config.save_dir.display())
        })?;
        Some(store)
    } else {
        None
    };

    let mut player = config.build_player();
    if let (true, Some(store)) = (args.load, store.as_ref()) {
        let report = player.load_progress_from(store, &config.save_key);
        println!("{}", report.message);
    }

    let mut battle = Battle::with_rewards(player, config.build_enemies(), config.rewards());
    let mut dice = config.dice();

    for line in battle.log() {
        println!("{}", line);
    }

    let mut turns = 0;
    while !battle.is_over() && turns < args.max_turns {
        let action = choose_action(&battle);
        let report = match battle.act(action, &mut dice) {
            Ok(report) => report,
            Err(e) => {
                println!("{}", e);
                battle.act(PlayerAction::Attack, &mut dice)?
            }
        };

        for line in &report.messages {
            println!("{}", line);
        }
        turns += 1;
    }

    if battle.is_over() {
        info!("Battle finished after {} turns: {:?}", turns, battle.status());
    } else {
        warn!("Battle stopped after {} turns without a result", turns);
    }

    if let (true, Some(store)) = (args.save, store.as_mut()) {
        let report = battle.player().save_progress_as(store, &config.save_key);
        println!("{}", report.message);
    }

    Ok(())
}
