//! Enemy AI system: runs the controller for every enemy car.
//!
//! Calls the state machine from autoduel-ai and writes heading, speed,
//! acceleration and controller memory back into the components.

use hecs::World;

use autoduel_core::components::{Enemy, EnemyBrain, Kinematics};
use autoduel_core::types::Position;

use autoduel_ai::fsm::{evaluate, EnemyContext};
use autoduel_ai::profiles::EnemyBehaviorProfile;

use super::player_position;

/// Build the controller input for one enemy.
pub(crate) fn context(
    pos: &Position,
    kin: &Kinematics,
    brain: &EnemyBrain,
    target: Option<Position>,
) -> EnemyContext {
    EnemyContext {
        position: *pos,
        direction: kin.current_direction,
        turn_rate: kin.turn_rate,
        current_speed: kin.current_speed,
        max_speed: kin.max_speed,
        acceleration: kin.acceleration,
        current_acceleration: kin.current_acceleration,
        detected_wall: brain.detected_wall,
        detected_target: brain.detected_target,
        target,
    }
}

/// Run the enemy controller for every enemy car.
pub fn run(world: &mut World, profile: &EnemyBehaviorProfile) {
    let target = player_position(world);

    for (_entity, (_enemy, pos, kin, brain)) in
        world.query_mut::<(&Enemy, &Position, &mut Kinematics, &mut EnemyBrain)>()
    {
        let update = evaluate(&context(pos, kin, brain, target), profile);

        kin.set_direction(update.new_direction);
        kin.current_speed = update.new_speed;
        kin.current_acceleration = update.new_acceleration;
        brain.mode = update.mode;
        brain.detected_target = update.detected_target;
        if update.clear_wall_flag {
            brain.detected_wall = false;
        }
    }
}
