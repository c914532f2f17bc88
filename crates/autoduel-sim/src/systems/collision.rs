//! Collision system: detects contacts and applies the resolver's effects.
//!
//! Runs on the positions left by the previous tick, before movement.

use std::collections::HashSet;

use hecs::{Entity, World};

use autoduel_core::components::*;
use autoduel_core::constants::ROLLBACK_TICKS;
use autoduel_core::enums::EntityKind;
use autoduel_core::events::{DamageEvent, SimEvent};
use autoduel_core::types::Position;

use crate::collision::{broad_phase, resolve, Body, Effect};
use crate::score::ScoreState;
use crate::world_setup::{entity_from_id, entity_id};

/// Run one collision pass over every collidable entity.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>, score: &mut ScoreState) {
    let bodies = gather_bodies(world);

    let mut effects = Vec::new();
    for (a, b) in broad_phase(&bodies) {
        effects.extend(resolve(&bodies[a], &bodies[b]));
        effects.extend(resolve(&bodies[b], &bodies[a]));
    }

    apply_effects(world, effects, events, score);
}

/// Snapshot every collider. Spent projectiles no longer collide.
fn gather_bodies(world: &World) -> Vec<Body> {
    let mut bodies = Vec::new();

    for (entity, (_player, pos, hitbox, kin)) in world
        .query::<(&Player, &Position, &Hitbox, &Kinematics)>()
        .iter()
    {
        bodies.push(vehicle_body(entity, EntityKind::Player, pos, hitbox, kin));
    }
    for (entity, (_enemy, pos, hitbox, kin)) in world
        .query::<(&Enemy, &Position, &Hitbox, &Kinematics)>()
        .iter()
    {
        bodies.push(vehicle_body(entity, EntityKind::Enemy, pos, hitbox, kin));
    }
    for (entity, (_wall, pos, hitbox)) in world.query::<(&Wall, &Position, &Hitbox)>().iter() {
        bodies.push(Body {
            entity,
            kind: EntityKind::Wall,
            rect: hitbox.rect_at(pos),
            direction: 0.0,
            owner: None,
            damage: 0.0,
        });
    }
    for (entity, (projectile, pos, hitbox, kin)) in world
        .query::<(&ProjectileState, &Position, &Hitbox, &Kinematics)>()
        .iter()
    {
        if projectile.destroyed {
            continue;
        }
        bodies.push(Body {
            entity,
            kind: EntityKind::Projectile,
            rect: hitbox.rect_at(pos),
            direction: kin.current_direction,
            owner: entity_from_id(projectile.owner),
            damage: projectile.damage,
        });
    }

    bodies
}

fn vehicle_body(
    entity: Entity,
    kind: EntityKind,
    pos: &Position,
    hitbox: &Hitbox,
    kin: &Kinematics,
) -> Body {
    Body {
        entity,
        kind,
        rect: hitbox.rect_at(pos),
        direction: kin.current_direction,
        owner: None,
        damage: 0.0,
    }
}

fn apply_effects(
    world: &mut World,
    effects: Vec<Effect>,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    // A vehicle touching several things in one pass is rolled back once.
    let mut rolled_back: HashSet<Entity> = HashSet::new();

    for effect in effects {
        match effect {
            Effect::Rollback { vehicle, other } => {
                if other == EntityKind::Wall {
                    if let Ok(mut brain) = world.get::<&mut EnemyBrain>(vehicle) {
                        brain.detected_wall = true;
                    }
                }
                if rolled_back.insert(vehicle) {
                    if let Some(to) = rollback(world, vehicle) {
                        events.push(SimEvent::Collision {
                            vehicle: entity_id(vehicle),
                            other,
                            rolled_back_to: to,
                        });
                    }
                }
            }
            Effect::Detonate { projectile } => {
                if let Ok(mut state) = world.get::<&mut ProjectileState>(projectile) {
                    state.detonate();
                }
            }
            Effect::Damage {
                target,
                attacker,
                approach,
                facing,
                amount,
            } => {
                if let Ok(mut armor) = world.get::<&mut Armor>(target) {
                    armor.apply_damage(facing, amount);
                    log::trace!(
                        "impact on {:?}: approach {:.1}, facing {:?}, armor left {:.1}",
                        target,
                        approach,
                        facing,
                        armor.get(facing)
                    );
                }

                score.hits += 1;
                if is_player(world, Some(target)) {
                    score.damage_taken += amount;
                }
                if is_player(world, attacker) {
                    score.damage_dealt += amount;
                }

                events.push(SimEvent::Damage(DamageEvent {
                    target: entity_id(target),
                    attacker: attacker.map(entity_id).unwrap_or_default(),
                    approach,
                    facing,
                    amount,
                }));
            }
        }
    }
}

/// Move a vehicle back `ROLLBACK_TICKS` along its history and stop it.
///
/// With a short history the oldest retained position is used; with none the
/// vehicle stays where it is. Speed and acceleration are zeroed either way.
fn rollback(world: &mut World, vehicle: Entity) -> Option<Position> {
    let mut query = world
        .query_one::<(&mut Position, &mut Kinematics, &PositionHistory)>(vehicle)
        .ok()?;
    let (pos, kin, history) = query.get()?;

    if let Some(previous) = history.ticks_back(ROLLBACK_TICKS) {
        *pos = previous;
    }
    kin.stop();
    Some(*pos)
}

fn is_player(world: &World, entity: Option<Entity>) -> bool {
    entity.is_some_and(|e| world.get::<&Player>(e).is_ok())
}
