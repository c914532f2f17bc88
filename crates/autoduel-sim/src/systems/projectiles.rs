//! Projectile lifecycle: flight and fuel burn.

use hecs::World;

use autoduel_core::components::{Kinematics, ProjectileState};
use autoduel_core::events::SimEvent;
use autoduel_core::geometry::offset_for_direction_and_distance;
use autoduel_core::types::Position;

/// Fly every live projectile one step and burn one unit of fuel.
/// A projectile is destroyed on the tick its fuel reaches zero.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    for (_entity, (pos, kin, projectile)) in
        world.query_mut::<(&mut Position, &Kinematics, &mut ProjectileState)>()
    {
        if projectile.destroyed {
            continue;
        }
        if projectile.fuel <= 0 {
            projectile.destroyed = true;
            continue;
        }

        *pos = pos.offset(offset_for_direction_and_distance(
            kin.current_direction,
            kin.current_speed,
        ));
        projectile.fuel -= 1;

        if projectile.fuel == 0 {
            projectile.destroyed = true;
            events.push(SimEvent::ProjectileExpired {
                owner: projectile.owner,
            });
        }
    }
}
