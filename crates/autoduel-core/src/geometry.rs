//! Heading, range, and approach-angle math shared by every entity.
//!
//! Headings are degrees in `[0, 360)`. 0° points along +y and headings grow
//! toward +x, so displacement uses `sin` for x and `cos` for y. Every
//! position update and spawn offset goes through
//! [`offset_for_direction_and_distance`] to keep that basis consistent.

use glam::DVec2;

use crate::constants::FULL_TURN;
use crate::enums::{ArmorFacing, TurnDirection};

/// Normalise any angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Bearing in degrees from origin to target.
///
/// Uses `atan2(dx, dy)` (arguments swapped relative to the usual convention)
/// so that 0° lies along +y.
pub fn direction(origin_x: f64, origin_y: f64, target_x: f64, target_y: f64) -> f64 {
    let dx = target_x - origin_x;
    let dy = target_y - origin_y;
    let degrees = dx.atan2(dy).to_degrees();
    if degrees < 0.0 {
        wrap_degrees(degrees + FULL_TURN)
    } else {
        wrap_degrees(degrees)
    }
}

/// Euclidean distance between two points.
pub fn range(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    DVec2::new(ax, ay).distance(DVec2::new(bx, by))
}

/// Relative bearing of an impact: `(360 - self_dir + other_dir) mod 360`.
pub fn approach_angle(self_direction: f64, other_direction: f64) -> f64 {
    wrap_degrees(FULL_TURN - self_direction + other_direction)
}

/// Bucket an approach angle into the armor facing that absorbs the hit.
///
/// Sectors are 90° wide and half-open so every angle maps to exactly one
/// facing: back `[315, 45)`, right `[45, 135)`, front `[135, 225)`,
/// left `[225, 315)`.
pub fn armor_facing(approach: f64) -> ArmorFacing {
    let approach = wrap_degrees(approach);
    if approach < 45.0 {
        ArmorFacing::Back
    } else if approach < 135.0 {
        ArmorFacing::Right
    } else if approach < 225.0 {
        ArmorFacing::Front
    } else if approach < 315.0 {
        ArmorFacing::Left
    } else {
        ArmorFacing::Back
    }
}

/// Displacement for travelling `distance` along `direction`.
pub fn offset_for_direction_and_distance(direction: f64, distance: f64) -> DVec2 {
    let radians = direction.to_radians();
    DVec2::new(radians.sin() * distance, radians.cos() * distance)
}

/// Which way to turn from `current` to reach `target` along the shorter arc.
///
/// Ties turn right. That covers exactly opposite headings and a heading
/// already on target, so an aligned car keeps swinging past its target.
pub fn shortest_turn(current: f64, target: f64) -> TurnDirection {
    let current = wrap_degrees(current);
    let target = wrap_degrees(target);
    let left = wrap_degrees(current - target);
    let right = wrap_degrees(target - current);
    if left < right {
        TurnDirection::Left
    } else {
        TurnDirection::Right
    }
}

/// Step `current` toward `target` by exactly `turn_rate` degrees.
///
/// There is no overshoot clamp: when `turn_rate` exceeds the remaining arc
/// the heading passes the target and swings back on later ticks.
pub fn steer_toward(current: f64, target: f64, turn_rate: f64) -> f64 {
    match shortest_turn(current, target) {
        TurnDirection::Left => wrap_degrees(current - turn_rate),
        TurnDirection::Right => wrap_degrees(current + turn_rate),
    }
}
