//! Simulation configuration.
//!
//! Defaults reproduce the original arena: a fast, heavily armored player
//! car against four slower enemies.

use serde::{Deserialize, Serialize};

use autoduel_ai::profiles::EnemyBehaviorProfile;
use autoduel_core::constants::*;
use autoduel_core::types::{Position, Rect};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub player: VehicleTuning,
    pub enemy: VehicleTuning,
    pub weapon: WeaponTuning,
    pub enemy_behavior: EnemyBehaviorProfile,
    pub roster: RosterConfig,
    /// Keep the enemy count topped up during a match.
    pub reinforcements: Option<ReinforcementConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player: VehicleTuning::player(),
            enemy: VehicleTuning::enemy(),
            weapon: WeaponTuning::default(),
            enemy_behavior: EnemyBehaviorProfile::default(),
            roster: RosterConfig::default(),
            reinforcements: None,
        }
    }
}

/// Per-class vehicle parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTuning {
    pub max_speed: f64,
    pub acceleration: f64,
    /// Degrees per tick.
    pub turn_rate: f64,
    /// Starting value of every armor facing.
    pub armor: f64,
    pub hull: f64,
    pub fire_rate: u32,
    pub hitbox_size: f64,
}

impl VehicleTuning {
    pub fn player() -> Self {
        Self {
            max_speed: PLAYER_MAX_SPEED,
            acceleration: PLAYER_ACCELERATION,
            turn_rate: DEFAULT_TURN_RATE,
            armor: PLAYER_ARMOR,
            hull: INTERNAL_HULL,
            fire_rate: DEFAULT_FIRE_RATE,
            hitbox_size: VEHICLE_HITBOX_SIZE,
        }
    }

    pub fn enemy() -> Self {
        Self {
            max_speed: ENEMY_MAX_SPEED,
            acceleration: ENEMY_ACCELERATION,
            armor: ENEMY_ARMOR,
            ..Self::player()
        }
    }
}

/// Machine-gun projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub speed: f64,
    /// Lifecycle ticks before burning out.
    pub fuel: i32,
    pub size: f64,
    /// Spawn distance ahead of the shooter.
    pub muzzle_offset: f64,
    pub damage: f64,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            fuel: PROJECTILE_FUEL,
            size: PROJECTILE_SIZE,
            muzzle_offset: MUZZLE_OFFSET,
            damage: PROJECTILE_DAMAGE,
        }
    }
}

/// Who is spawned by `StartMatch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub player: Option<Position>,
    pub enemies: Vec<Position>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            player: Some(Position::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1)),
            enemies: ENEMY_SPAWNS
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        }
    }
}

impl RosterConfig {
    /// Nobody spawns on match start.
    pub fn empty() -> Self {
        Self {
            player: None,
            enemies: Vec::new(),
        }
    }
}

/// Random enemy top-up while a match runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementConfig {
    /// Spawn while fewer enemies than this are in the world.
    pub min_enemies: u32,
    /// Probability per tick of spawning when below the minimum.
    pub spawn_chance: f64,
    /// Region new enemies are placed in.
    pub area: Rect,
    /// Placement tries per spawn before giving up for this tick.
    pub max_attempts: u32,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            min_enemies: 3,
            spawn_chance: 0.02,
            area: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            max_attempts: 8,
        }
    }
}
