//! Gameplay constants shared by every battle

/// Health restored by a Health Potion
pub const HEALTH_POTION_HEAL_AMOUNT: u32 = 20;
/// Attack bonus granted by an Attack Boost item
pub const ATTACK_BOOST_VALUE: u32 = 10;
/// Damage dealt by Poison each turn-end
pub const POISON_DAMAGE_PER_TURN: u32 = 8;
/// Damage dealt by Burn each turn-end
pub const BURN_DAMAGE_PER_TURN: u32 = 5;
/// Flat defense set by the defend action
pub const DEFENSE_BONUS_FROM_DEFEND: u32 = 15;
/// Value of the Defensive Stance buff added by the defend action
pub const DEFENSIVE_STANCE_BUFF_VALUE: u32 = 5;

pub const WARRIOR_SPECIAL_COOLDOWN: u32 = 2;
pub const MAGE_SPECIAL_COOLDOWN: u32 = 2;
/// Flat bonus added to a Mage's attack power by Fireball
pub const FIREBALL_BONUS_DAMAGE: u32 = 15;
pub const FIREBALL_BURN_DURATION: u32 = 2;
pub const MAGE_MANA_COST_FIREBALL: u32 = 30;
pub const MAGE_MANA_REGEN_PER_TURN: u32 = 15;
pub const MAX_MANA: u32 = 100;

pub const PLAYER_INITIAL_HEALTH: u32 = 100;
pub const PLAYER_INITIAL_ATTACK_POWER: u32 = 15;
pub const PLAYER_INITIAL_XP_TO_LEVEL: u32 = 50;
/// Experience awarded for each defeated enemy
pub const XP_GAIN_PER_ENEMY: u32 = 20;
pub const XP_INCREASE_PER_LEVEL: u32 = 20;
pub const HEALTH_INCREASE_PER_LEVEL: u32 = 20;
pub const ATTACK_INCREASE_PER_LEVEL: u32 = 5;

pub const INVENTORY_MAX_ITEMS: usize = 5;
pub const POISON_DART_DURATION: u32 = 3;
