//! Pairwise collision resolution.
//!
//! [`resolve`] is a pure function of two collider snapshots: it decides what
//! `body` does about touching `other` and returns the effects. The collision
//! system gathers bodies, finds candidate pairs, calls `resolve` in both
//! directions and only then applies the effects, so every decision in a pass
//! sees the same pre-pass state.

use hecs::Entity;

use autoduel_core::enums::{ArmorFacing, EntityKind};
use autoduel_core::geometry::{approach_angle, armor_facing};
use autoduel_core::types::Rect;

/// Collider state captured at the start of a collision pass.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub entity: Entity,
    pub kind: EntityKind,
    pub rect: Rect,
    /// Heading in degrees (0 for walls).
    pub direction: f64,
    /// Firing vehicle, for projectiles.
    pub owner: Option<Entity>,
    /// Armor removed on impact, for projectiles.
    pub damage: f64,
}

/// A state change requested by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Move the vehicle back along its history and stop it.
    Rollback {
        vehicle: Entity,
        other: EntityKind,
    },
    /// Spend the projectile.
    Detonate { projectile: Entity },
    /// Remove armor from one facing of the struck vehicle.
    Damage {
        target: Entity,
        attacker: Option<Entity>,
        approach: f64,
        facing: ArmorFacing,
        amount: f64,
    },
}

/// Effects of `body` touching `other`, from `body`'s side only.
///
/// Returns nothing when the rectangles do not strictly overlap.
pub fn resolve(body: &Body, other: &Body) -> Vec<Effect> {
    if body.entity == other.entity || !body.rect.intersects(&other.rect) {
        return Vec::new();
    }

    match (body.kind, other.kind) {
        (kind, other_kind)
            if kind.is_vehicle() && (other_kind == EntityKind::Wall || other_kind.is_vehicle()) =>
        {
            vec![Effect::Rollback {
                vehicle: body.entity,
                other: other.kind,
            }]
        }
        (EntityKind::Projectile, EntityKind::Wall) => vec![Effect::Detonate {
            projectile: body.entity,
        }],
        (EntityKind::Projectile, other_kind) if other_kind.is_vehicle() => {
            if body.owner == Some(other.entity) {
                return Vec::new();
            }
            let approach = approach_angle(body.direction, other.direction);
            vec![
                Effect::Detonate {
                    projectile: body.entity,
                },
                Effect::Damage {
                    target: other.entity,
                    attacker: body.owner,
                    approach,
                    facing: armor_facing(approach),
                    amount: body.damage,
                },
            ]
        }
        // Walls never act. Projectile hits are handled from the projectile's side.
        _ => Vec::new(),
    }
}

/// Candidate pairs whose x-extents overlap, by index into `bodies`.
///
/// Sweep-and-prune on the x axis. Pairs are reported once, lower sorted
/// position first, in a stable order for identical input.
pub fn broad_phase(bodies: &[Body]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..bodies.len()).collect();
    order.sort_by(|&a, &b| bodies[a].rect.x.total_cmp(&bodies[b].rect.x));

    let mut pairs = Vec::new();
    for (i, &a) in order.iter().enumerate() {
        let right = bodies[a].rect.right();
        for &b in &order[i + 1..] {
            if bodies[b].rect.x >= right {
                break;
            }
            if is_static_pair(&bodies[a], &bodies[b]) {
                continue;
            }
            pairs.push((a, b));
        }
    }
    pairs
}

fn is_static_pair(a: &Body, b: &Body) -> bool {
    a.kind == EntityKind::Wall && b.kind == EntityKind::Wall
}
