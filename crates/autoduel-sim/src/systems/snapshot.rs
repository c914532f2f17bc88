//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.
//! Entities are listed in ascending id order so snapshots of identical
//! worlds serialize identically.

use hecs::World;

use autoduel_core::components::*;
use autoduel_core::enums::*;
use autoduel_core::events::SimEvent;
use autoduel_core::state::*;
use autoduel_core::types::{Position, SimTime};

use crate::score::ScoreState;
use crate::world_setup::entity_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<SimEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    let vehicles = build_vehicles(world);
    let enemies_remaining = vehicles
        .iter()
        .filter(|v| v.kind == EntityKind::Enemy)
        .count() as u32;

    GameStateSnapshot {
        time: *time,
        phase,
        vehicles,
        projectiles: build_projectiles(world),
        walls: build_walls(world),
        events,
        score: ScoreView {
            shots_fired: score.shots_fired,
            hits: score.hits,
            damage_dealt: score.damage_dealt,
            damage_taken: score.damage_taken,
            enemies_remaining,
            reinforcements: score.reinforcements,
        },
    }
}

fn build_vehicles(world: &World) -> Vec<VehicleView> {
    let mut query = world.query::<(
        &Position,
        &Kinematics,
        &Armor,
        &Hull,
        &FireControl,
        Option<&Player>,
        Option<&EnemyBrain>,
    )>();

    let mut vehicles: Vec<VehicleView> = query
        .iter()
        .filter_map(|(entity, (pos, kin, armor, hull, fire, player, brain))| {
            let kind = match (player, brain) {
                (Some(_), _) => EntityKind::Player,
                (None, Some(_)) => EntityKind::Enemy,
                (None, None) => return None,
            };
            Some(VehicleView {
                id: entity_id(entity),
                kind,
                position: *pos,
                direction: kin.current_direction,
                speed: kin.current_speed,
                acceleration: kin.current_acceleration,
                armor: *armor,
                hull: hull.internal,
                ai_mode: brain.map(|b| b.mode),
                firing: fire.firing,
            })
        })
        .collect();

    vehicles.sort_by_key(|v| v.id);
    vehicles
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Position, &Kinematics, &ProjectileState)>()
        .iter()
        .map(|(entity, (pos, kin, projectile))| ProjectileView {
            id: entity_id(entity),
            owner: projectile.owner,
            position: *pos,
            direction: kin.current_direction,
            fuel: projectile.fuel,
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_walls(world: &World) -> Vec<WallView> {
    let mut walls: Vec<WallView> = world
        .query::<(&Wall, &Position, &Hitbox)>()
        .iter()
        .map(|(entity, (_wall, pos, hitbox))| WallView {
            id: entity_id(entity),
            rect: hitbox.rect_at(pos),
        })
        .collect();

    walls.sort_by_key(|w| w.id);
    walls
}
