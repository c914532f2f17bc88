//! Cleanup system: removes spent projectiles and vehicles marked for removal.

use hecs::{Entity, World};

use autoduel_core::components::{Enemy, Player, ProjectileState, Removed};
use autoduel_core::enums::EntityKind;
use autoduel_core::events::SimEvent;

use crate::world_setup::entity_id;

/// Despawn destroyed projectiles and removed vehicles.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&ProjectileState>() {
        if projectile.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (_removed, player, enemy)) in
        world.query_mut::<(&Removed, Option<&Player>, Option<&Enemy>)>()
    {
        let kind = if player.is_some() {
            EntityKind::Player
        } else if enemy.is_some() {
            EntityKind::Enemy
        } else {
            continue;
        };
        events.push(SimEvent::VehicleRemoved {
            vehicle: entity_id(entity),
            kind,
        });
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
