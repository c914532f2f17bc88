//! Tunable parameters for the enemy controller.

use serde::{Deserialize, Serialize};

use autoduel_core::constants::{ENEMY_DETECTION_RADIUS, ENEMY_FIRE_RANGE, WALL_EVADE_TURN};

/// Behavioral profile shared by enemy cars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyBehaviorProfile {
    /// Radius inside which the player is detected and pursued.
    pub detection_radius: f64,
    /// Range inside which an aligned enemy fires.
    pub fire_range: f64,
    /// Heading change when backing off a wall (degrees).
    pub wall_evade_turn: f64,
}

impl Default for EnemyBehaviorProfile {
    fn default() -> Self {
        Self {
            detection_radius: ENEMY_DETECTION_RADIUS,
            fire_range: ENEMY_FIRE_RANGE,
            wall_evade_turn: WALL_EVADE_TURN,
        }
    }
}
