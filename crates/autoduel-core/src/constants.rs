//! Simulation constants and tuning parameters.
//!
//! All speeds and accelerations are in world units per tick; the simulation
//! has no notion of a variable dt.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Headings ---

/// Degrees in a full turn. Headings live in `[0, FULL_TURN)`.
pub const FULL_TURN: f64 = 360.0;

/// Default maximum heading change per tick (degrees).
pub const DEFAULT_TURN_RATE: f64 = 2.0;

// --- World ---

/// Default arena width in world units.
pub const WORLD_WIDTH: f64 = 5000.0;

/// Default arena height in world units.
pub const WORLD_HEIGHT: f64 = 5000.0;

// --- Vehicles ---

/// Vehicle hitbox edge length (square).
pub const VEHICLE_HITBOX_SIZE: f64 = 20.0;

/// Generic internal hit points for every entity.
pub const INTERNAL_HULL: f64 = 100.0;

/// Player top speed.
pub const PLAYER_MAX_SPEED: f64 = 4.0;

/// Player acceleration (unused by the player's speed step, kept for telemetry).
pub const PLAYER_ACCELERATION: f64 = 0.005;

/// Armor on every facing of the player's vehicle.
pub const PLAYER_ARMOR: f64 = 100.0;

/// Enemy top speed.
pub const ENEMY_MAX_SPEED: f64 = 1.0;

/// Per-tick growth of an enemy's current acceleration.
pub const ENEMY_ACCELERATION: f64 = 0.005;

/// Armor on every facing of an enemy vehicle.
pub const ENEMY_ARMOR: f64 = 50.0;

/// Ticks between shots while the trigger is held (fire-rate limiter target).
pub const DEFAULT_FIRE_RATE: u32 = 2;

// --- Position history / collision rollback ---

/// Number of past positions retained per vehicle.
pub const POSITION_HISTORY_CAPACITY: usize = 20;

/// How far back (in ticks) a colliding vehicle is rolled back.
/// With a full buffer this is history index 3 counted from the oldest entry.
pub const ROLLBACK_TICKS: usize = 17;

// --- Enemy AI ---

/// Radius inside which an enemy detects and pursues the player.
pub const ENEMY_DETECTION_RADIUS: f64 = 200.0;

/// Range inside which an aligned enemy opens fire.
pub const ENEMY_FIRE_RANGE: f64 = 150.0;

/// Heading change applied when an enemy backs off a wall (degrees).
pub const WALL_EVADE_TURN: f64 = 180.0;

// --- Projectiles (machine gun) ---

/// Projectile speed.
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Lifecycle ticks before a projectile burns out.
pub const PROJECTILE_FUEL: i32 = 50;

/// Projectile hitbox edge length (square).
pub const PROJECTILE_SIZE: f64 = 4.0;

/// Distance ahead of the shooter at which projectiles spawn.
pub const MUZZLE_OFFSET: f64 = 15.0;

/// Armor removed by one projectile hit.
pub const PROJECTILE_DAMAGE: f64 = 10.0;

/// Sentinel fuel value: unlimited for vehicles, spent-on-impact for projectiles.
pub const FUEL_UNLIMITED: i32 = -1;

// --- Default roster ---

/// Player spawn point.
pub const PLAYER_SPAWN: (f64, f64) = (150.0, 150.0);

/// Enemy spawn points.
pub const ENEMY_SPAWNS: [(f64, f64); 4] = [
    (200.0, 700.0),
    (700.0, 700.0),
    (700.0, 200.0),
    (500.0, 500.0),
];
