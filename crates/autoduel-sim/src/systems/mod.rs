//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod fire_control;
pub mod movement;
pub mod projectiles;
pub mod reinforcements;
pub mod snapshot;
pub mod steering;

use hecs::World;

use autoduel_core::components::{Player, Removed};
use autoduel_core::types::Position;

/// Position of the player's car, unless it has been removed.
pub(crate) fn player_position(world: &World) -> Option<Position> {
    world
        .query::<(&Player, &Position, Option<&Removed>)>()
        .iter()
        .find(|(_, (_, _, removed))| removed.is_none())
        .map(|(_, (_, pos, _))| *pos)
}
