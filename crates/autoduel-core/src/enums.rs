//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Category tag carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Player,
    Enemy,
    Wall,
    Projectile,
}

impl EntityKind {
    /// Player and enemy cars.
    pub fn is_vehicle(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Enemy)
    }
}

/// Directional armor plate selected by an impact's approach angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorFacing {
    Front,
    Back,
    Left,
    Right,
    Under,
}

/// Result of a shortest-arc heading comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Decreasing heading.
    Left,
    /// Increasing heading.
    Right,
}

/// Overall simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// World built (map loaded) but the match has not started.
    #[default]
    Setup,
    Active,
    Paused,
}

/// Which branch of the enemy controller drove the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyMode {
    /// No target in range: circle right.
    #[default]
    Patrol,
    /// Player inside detection radius: turn toward them.
    Pursuit,
    /// Bounced off a wall last tick: flipped around.
    WallEvade,
}

/// Weapons a vehicle can select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    MachineGun,
}
