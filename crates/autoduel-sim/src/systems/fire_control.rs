//! Fire-control system: trigger decisions, rate limiting, and projectile spawn.
//!
//! Enemies decide to fire here, after movement, from their post-move heading.
//! The player's trigger comes from input. Every held trigger advances the
//! rate limiter, and a released shot spawns a projectile ahead of the car.

use hecs::{Entity, World};

use autoduel_core::components::{Enemy, EnemyBrain, FireControl, Kinematics};
use autoduel_core::enums::WeaponType;
use autoduel_core::events::SimEvent;
use autoduel_core::types::Position;

use autoduel_ai::fsm::should_fire;
use autoduel_ai::profiles::EnemyBehaviorProfile;

use crate::config::WeaponTuning;
use crate::score::ScoreState;
use crate::world_setup::{entity_id, spawn_projectile};

use super::enemy_ai::context;
use super::player_position;

/// Run fire control for all armed vehicles.
pub fn run(
    world: &mut World,
    weapon: &WeaponTuning,
    profile: &EnemyBehaviorProfile,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    let target = player_position(world);

    for (_entity, (_enemy, pos, kin, brain, fire)) in world.query_mut::<(
        &Enemy,
        &Position,
        &Kinematics,
        &mut EnemyBrain,
        &mut FireControl,
    )>() {
        brain.should_fire = should_fire(&context(pos, kin, brain, target), profile);
        fire.firing = brain.should_fire;
    }

    // Collect shots first to avoid spawning while the query holds the world.
    let mut shots: Vec<(Entity, Position, f64, WeaponType)> = Vec::new();
    for (entity, (pos, kin, fire)) in
        world.query_mut::<(&Position, &Kinematics, &mut FireControl)>()
    {
        if fire.firing && fire.cycle() {
            shots.push((entity, *pos, kin.current_direction, fire.selected_weapon));
        }
    }

    for (shooter, origin, direction, weapon_type) in shots {
        match weapon_type {
            WeaponType::MachineGun => {
                spawn_projectile(world, weapon, shooter, origin, direction);
            }
        }
        score.shots_fired += 1;
        events.push(SimEvent::ShotFired {
            shooter: entity_id(shooter),
            weapon: weapon_type,
        });
    }
}
