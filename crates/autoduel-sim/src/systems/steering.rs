//! Player steering: turn toward the requested heading at the car's turn rate.

use hecs::World;

use autoduel_core::commands::InputFrame;
use autoduel_core::components::{FireControl, Kinematics, Player, Steering};
use autoduel_core::geometry::{steer_toward, wrap_degrees};

/// Apply one frame of player input.
///
/// A non-zero throttle updates the requested heading; zero throttle keeps
/// the previous request so the car finishes its turn. The throttle and
/// trigger stay held until the next frame.
pub fn apply_input(world: &mut World, frame: &InputFrame) {
    for (_entity, (_player, steering, fire)) in
        world.query_mut::<(&Player, &mut Steering, &mut FireControl)>()
    {
        if frame.throttle != 0.0 {
            steering.set_direction = wrap_degrees(frame.heading);
        }
        steering.throttle = Some(frame.throttle);
        fire.firing = frame.fire;
    }
}

/// Set the player's speed from the held throttle. Runs every active tick,
/// so a car stopped by a collision drives on the tick after.
pub fn hold_throttle(world: &mut World) {
    for (_entity, (_player, steering, kin)) in
        world.query_mut::<(&Player, &Steering, &mut Kinematics)>()
    {
        if let Some(throttle) = steering.throttle {
            kin.current_speed = throttle * kin.max_speed;
        }
    }
}

/// Advance the player's heading one step toward the requested heading.
pub fn run(world: &mut World) {
    for (_entity, (_player, steering, kin)) in
        world.query_mut::<(&Player, &Steering, &mut Kinematics)>()
    {
        kin.current_direction =
            steer_toward(kin.current_direction, steering.set_direction, kin.turn_rate);
    }
}
