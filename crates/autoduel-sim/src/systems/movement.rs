//! Kinematic integration for vehicles.
//!
//! Records the pre-move position in the rollback history, then displaces the
//! car by its speed along its heading.

use hecs::World;

use autoduel_core::components::{Kinematics, PositionHistory};
use autoduel_core::geometry::offset_for_direction_and_distance;
use autoduel_core::types::Position;

/// Move every entity that keeps a position history (vehicles only).
pub fn run(world: &mut World) {
    for (_entity, (pos, kin, history)) in
        world.query_mut::<(&mut Position, &Kinematics, &mut PositionHistory)>()
    {
        history.push(*pos);
        *pos = pos.offset(offset_for_direction_and_distance(
            kin.current_direction,
            kin.current_speed,
        ));
    }
}
