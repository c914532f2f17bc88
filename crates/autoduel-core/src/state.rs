//! Game state snapshot: the complete visible state handed to the renderer
//! and telemetry sinks after each tick.
//!
//! Positions are world coordinates; projecting them to the screen is the
//! renderer's job.

use serde::{Deserialize, Serialize};

use crate::components::Armor;
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{EntityId, Position, Rect, SimTime};

/// Complete world state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub vehicles: Vec<VehicleView>,
    pub projectiles: Vec<ProjectileView>,
    pub walls: Vec<WallView>,
    pub events: Vec<SimEvent>,
    pub score: ScoreView,
}

/// A player or enemy car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    /// Heading in degrees.
    pub direction: f64,
    pub speed: f64,
    pub acceleration: f64,
    pub armor: Armor,
    pub hull: f64,
    /// Enemy controller branch (None for the player).
    pub ai_mode: Option<EnemyMode>,
    pub firing: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub owner: EntityId,
    pub position: Position,
    pub direction: f64,
    pub fuel: i32,
}

/// A static obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallView {
    pub id: EntityId,
    pub rect: Rect,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub shots_fired: u32,
    pub hits: u32,
    /// Armor the player removed from enemies.
    pub damage_dealt: f64,
    /// Armor enemies removed from the player.
    pub damage_taken: f64,
    pub enemies_remaining: u32,
    pub reinforcements: u32,
}

impl GameStateSnapshot {
    /// The player's vehicle, if it is still in the world.
    pub fn player(&self) -> Option<&VehicleView> {
        self.vehicles.iter().find(|v| v.kind == EntityKind::Player)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &VehicleView> {
        self.vehicles.iter().filter(|v| v.kind == EntityKind::Enemy)
    }
}
