//! Enemy controller state machine.
//!
//! Pure functions that compute the next heading, acceleration, and speed of
//! an enemy car from its current state and the player's position.
//! No ECS dependency; operates on plain data.
//!
//! Branch priority, evaluated every tick:
//! 1. wall evade: a wall contact on the previous collision pass flips the car
//!    around and clears the flag,
//! 2. pursuit: the player was detected inside the radius, this tick or
//!    before a wall-evade tick that deferred the chase,
//! 3. patrol: constant right-hand orbit.

use autoduel_core::enums::EnemyMode;
use autoduel_core::geometry::{steer_toward, wrap_degrees};
use autoduel_core::types::Position;

use crate::profiles::EnemyBehaviorProfile;

/// Input to the enemy controller for a single car.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub position: Position,
    /// Heading in degrees.
    pub direction: f64,
    pub turn_rate: f64,
    pub current_speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    pub current_acceleration: f64,
    /// Wall contact flagged by the previous collision pass.
    pub detected_wall: bool,
    /// Detection carried over from an earlier tick and not yet pursued.
    pub detected_target: bool,
    /// Player position, if the player is in the world.
    pub target: Option<Position>,
}

/// Output from the enemy controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyUpdate {
    pub mode: EnemyMode,
    pub new_direction: f64,
    pub new_speed: f64,
    pub new_acceleration: f64,
    /// Detection to carry into the next tick. Only a wall-evade tick keeps it.
    pub detected_target: bool,
    /// The wall flag has been consumed.
    pub clear_wall_flag: bool,
}

/// Evaluate the controller for one enemy car.
pub fn evaluate(ctx: &EnemyContext, profile: &EnemyBehaviorProfile) -> EnemyUpdate {
    let detected = ctx.detected_target || target_in_radar(ctx, profile);

    let (mode, new_direction, detected_target) = if ctx.detected_wall {
        (
            EnemyMode::WallEvade,
            wrap_degrees(ctx.direction + profile.wall_evade_turn),
            detected,
        )
    } else if let (true, Some(target)) = (detected, ctx.target) {
        let bearing = ctx.position.direction_to(&target).trunc();
        (
            EnemyMode::Pursuit,
            steer_toward(ctx.direction, bearing, ctx.turn_rate),
            false,
        )
    } else {
        (
            EnemyMode::Patrol,
            wrap_degrees(ctx.direction + ctx.turn_rate),
            false,
        )
    };

    let new_acceleration = next_acceleration(ctx);
    let new_speed = next_speed(ctx.current_speed, ctx.max_speed, new_acceleration);

    EnemyUpdate {
        mode,
        new_direction,
        new_speed,
        new_acceleration,
        detected_target,
        clear_wall_flag: ctx.detected_wall,
    }
}

/// True iff the truncated bearing to the player equals the current heading
/// exactly and the player is inside fire range. There is no firing cone.
pub fn should_fire(ctx: &EnemyContext, profile: &EnemyBehaviorProfile) -> bool {
    let Some(target) = ctx.target else {
        return false;
    };
    let bearing = ctx.position.direction_to(&target).trunc();
    let range = ctx.position.range_to(&target);
    bearing == ctx.direction && range < profile.fire_range
}

fn target_in_radar(ctx: &EnemyContext, profile: &EnemyBehaviorProfile) -> bool {
    ctx.target
        .map(|target| ctx.position.range_to(&target) < profile.detection_radius)
        .unwrap_or(false)
}

/// Acceleration accumulates every tick with no decay.
fn next_acceleration(ctx: &EnemyContext) -> f64 {
    ctx.current_acceleration + ctx.acceleration
}

/// Speed climbs toward the cap while below it and never drops on its own.
fn next_speed(current: f64, max: f64, acceleration: f64) -> f64 {
    if current < max {
        (current + acceleration).min(max)
    } else {
        current
    }
}
