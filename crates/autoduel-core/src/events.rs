//! Events emitted by the simulation for telemetry and UI feedback.
//!
//! Nothing in the simulation depends on these being consumed.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Position};

/// Armor damage produced by one projectile impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    /// Vehicle that took the hit.
    pub target: EntityId,
    /// Vehicle that fired the projectile.
    pub attacker: EntityId,
    /// Relative impact bearing in degrees.
    pub approach: f64,
    pub facing: ArmorFacing,
    pub amount: f64,
}

/// Everything notable that happened during a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A vehicle hit a wall or another vehicle and was rolled back.
    Collision {
        vehicle: EntityId,
        other: EntityKind,
        rolled_back_to: Position,
    },
    /// A projectile struck a vehicle.
    Damage(DamageEvent),
    /// A vehicle fired.
    ShotFired { shooter: EntityId, weapon: WeaponType },
    /// A projectile ran out of fuel without hitting anything.
    ProjectileExpired { owner: EntityId },
    /// The reinforcement spawner added an enemy.
    EnemySpawned { enemy: EntityId, position: Position },
    /// A vehicle was taken out of the world.
    VehicleRemoved { vehicle: EntityId, kind: EntityKind },
}
