//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems, except for the
//! small accessors below that keep invariants (heading wrap, ring-buffer
//! indexing) in one place.

use serde::{Deserialize, Serialize};

use crate::constants::{FUEL_UNLIMITED, POSITION_HISTORY_CAPACITY};
use crate::enums::*;
use crate::geometry::wrap_degrees;
use crate::types::{EntityId, Position, Rect};

/// Heading, speed, and acceleration state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Heading in degrees, always in `[0, 360)`.
    pub current_direction: f64,
    pub current_speed: f64,
    pub max_speed: f64,
    /// Per-tick growth applied to `current_acceleration` by controllers that use it.
    pub acceleration: f64,
    pub current_acceleration: f64,
    /// Maximum heading change per tick (degrees).
    pub turn_rate: f64,
}

impl Kinematics {
    pub fn set_direction(&mut self, degrees: f64) {
        self.current_direction = wrap_degrees(degrees);
    }

    /// Kill all motion (collision response).
    pub fn stop(&mut self) {
        self.current_speed = 0.0;
        self.current_acceleration = 0.0;
    }
}

/// Collision box anchored at the entity's position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn square(size: f64) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// World-space rectangle for an entity at `pos`.
    pub fn rect_at(&self, pos: &Position) -> Rect {
        Rect::new(pos.x, pos.y, self.width, self.height)
    }
}

/// Generic hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub internal: f64,
}

/// Directional armor. Values may go negative; deciding what that means is
/// left to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub front: f64,
    pub back: f64,
    pub left: f64,
    pub right: f64,
    pub under: f64,
}

impl Armor {
    /// Same value on every facing.
    pub fn uniform(value: f64) -> Self {
        Self {
            front: value,
            back: value,
            left: value,
            right: value,
            under: value,
        }
    }

    pub fn get(&self, facing: ArmorFacing) -> f64 {
        match facing {
            ArmorFacing::Front => self.front,
            ArmorFacing::Back => self.back,
            ArmorFacing::Left => self.left,
            ArmorFacing::Right => self.right,
            ArmorFacing::Under => self.under,
        }
    }

    /// Subtract damage from one facing. No floor.
    pub fn apply_damage(&mut self, facing: ArmorFacing, amount: f64) {
        let plate = match facing {
            ArmorFacing::Front => &mut self.front,
            ArmorFacing::Back => &mut self.back,
            ArmorFacing::Left => &mut self.left,
            ArmorFacing::Right => &mut self.right,
            ArmorFacing::Under => &mut self.under,
        };
        *plate -= amount;
    }

    /// Lowest value across the four side facings.
    pub fn weakest(&self) -> f64 {
        self.front.min(self.back).min(self.left).min(self.right)
    }
}

/// Fixed-capacity ring buffer of the last positions a vehicle occupied.
///
/// A position is pushed at the start of every position update, so the newest
/// entry is where the vehicle was one tick ago.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PositionHistory {
    slots: [Position; POSITION_HISTORY_CAPACITY],
    /// Index of the oldest entry.
    head: usize,
    len: usize,
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self {
            slots: [Position::default(); POSITION_HISTORY_CAPACITY],
            head: 0,
            len: 0,
        }
    }
}

impl PositionHistory {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == POSITION_HISTORY_CAPACITY
    }

    /// Record a position, evicting the oldest one when full.
    pub fn push(&mut self, pos: Position) {
        if self.len < POSITION_HISTORY_CAPACITY {
            let idx = (self.head + self.len) % POSITION_HISTORY_CAPACITY;
            self.slots[idx] = pos;
            self.len += 1;
        } else {
            self.slots[self.head] = pos;
            self.head = (self.head + 1) % POSITION_HISTORY_CAPACITY;
        }
    }

    /// Entry `index` counted from the oldest retained one.
    pub fn get(&self, index: usize) -> Option<Position> {
        if index >= self.len {
            return None;
        }
        Some(self.slots[(self.head + index) % POSITION_HISTORY_CAPACITY])
    }

    pub fn oldest(&self) -> Option<Position> {
        self.get(0)
    }

    pub fn newest(&self) -> Option<Position> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Position `ticks` updates ago, or the oldest retained one if the
    /// history does not reach that far back. `None` when empty.
    pub fn ticks_back(&self, ticks: usize) -> Option<Position> {
        if ticks == 0 || self.is_empty() {
            return None;
        }
        let index = self.len.saturating_sub(ticks);
        self.get(index)
    }
}

/// Weapon trigger and rate limiter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireControl {
    /// Limiter value at which the next shot is released.
    pub fire_rate: u32,
    /// Ticks counted since the last shot while the trigger was held.
    pub limiter: u32,
    /// Trigger held this tick.
    pub firing: bool,
    pub selected_weapon: WeaponType,
}

impl FireControl {
    pub fn new(fire_rate: u32) -> Self {
        Self {
            fire_rate,
            limiter: 0,
            firing: false,
            selected_weapon: WeaponType::default(),
        }
    }

    /// Advance the limiter for a held trigger. Returns true when a shot is
    /// released (the limiter then restarts from zero).
    pub fn cycle(&mut self) -> bool {
        if self.limiter == self.fire_rate {
            self.limiter = 0;
            true
        } else {
            self.limiter += 1;
            false
        }
    }
}

/// Heading requested by the input layer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Steering {
    pub set_direction: f64,
    /// Throttle from the last input frame, reapplied every tick. `None`
    /// until the first frame arrives.
    pub throttle: Option<f64>,
}

/// Enemy controller memory between ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyBrain {
    /// Set by the collision pass on a wall contact, consumed by the next AI step.
    pub detected_wall: bool,
    /// Player detected inside the radius and not yet pursued. Survives a
    /// wall-evade tick; cleared by the pursuit step that consumes it.
    pub detected_target: bool,
    /// Aligned and in range on the last fire-control step.
    pub should_fire: bool,
    pub mode: EnemyMode,
}

/// Projectile lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Vehicle that fired this projectile, for attribution only.
    pub owner: EntityId,
    /// Remaining lifecycle ticks. `FUEL_UNLIMITED` once spent on impact.
    pub fuel: i32,
    pub destroyed: bool,
    /// Armor removed from the facing this projectile hits.
    pub damage: f64,
}

impl ProjectileState {
    pub fn new(owner: EntityId, fuel: i32, damage: f64) -> Self {
        Self {
            owner,
            fuel,
            destroyed: false,
            damage,
        }
    }

    /// Spend the projectile on impact.
    pub fn detonate(&mut self) {
        self.fuel = FUEL_UNLIMITED;
        self.destroyed = true;
    }
}

/// Marks the player-controlled vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an AI-controlled vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// Marks a static obstacle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall;

/// Marks a vehicle scheduled for removal by the cleanup pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Removed;
