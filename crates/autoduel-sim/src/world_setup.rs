//! Entity spawn factories for setting up the simulation world.
//!
//! Creates vehicles, walls, and projectiles with the component bundles the
//! systems expect.

use hecs::{Entity, World};

use autoduel_core::components::*;
use autoduel_core::geometry::offset_for_direction_and_distance;
use autoduel_core::types::{EntityId, Position, Rect};
use autoduel_map::WallDescriptor;

use crate::config::{RosterConfig, SimConfig, VehicleTuning, WeaponTuning};

/// Stable identifier exposed in snapshots and events.
pub fn entity_id(entity: Entity) -> EntityId {
    entity.to_bits().get()
}

/// Reverse of [`entity_id`]. Returns None for ids hecs could never have issued.
pub fn entity_from_id(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id)
}

/// Spawn the match roster. Returns the player entity, if one was configured.
pub fn setup_match(world: &mut World, config: &SimConfig) -> Option<Entity> {
    spawn_roster(world, &config.roster, &config.player, &config.enemy)
}

fn spawn_roster(
    world: &mut World,
    roster: &RosterConfig,
    player: &VehicleTuning,
    enemy: &VehicleTuning,
) -> Option<Entity> {
    let player_entity = roster
        .player
        .map(|pos| spawn_player(world, player, pos));
    for &pos in &roster.enemies {
        spawn_enemy(world, enemy, pos);
    }
    player_entity
}

/// Spawn one wall entity per descriptor. Returns the number spawned.
pub fn spawn_walls(world: &mut World, walls: &[WallDescriptor]) -> usize {
    for wall in walls {
        spawn_wall(world, wall.rect());
    }
    walls.len()
}

/// Spawn a static obstacle covering `rect`.
pub fn spawn_wall(world: &mut World, rect: Rect) -> Entity {
    world.spawn((
        Wall,
        Position::new(rect.x, rect.y),
        Hitbox {
            width: rect.width,
            height: rect.height,
        },
    ))
}

/// Spawn the player's car, facing 0 and at rest.
pub fn spawn_player(world: &mut World, tuning: &VehicleTuning, pos: Position) -> Entity {
    let (kinematics, hitbox, hull, armor, fire) = vehicle_parts(tuning);
    world.spawn((
        Player,
        pos,
        kinematics,
        hitbox,
        hull,
        armor,
        PositionHistory::default(),
        fire,
        Steering::default(),
    ))
}

/// Spawn an enemy car, facing 0 and at rest, in patrol mode.
pub fn spawn_enemy(world: &mut World, tuning: &VehicleTuning, pos: Position) -> Entity {
    let (kinematics, hitbox, hull, armor, fire) = vehicle_parts(tuning);
    world.spawn((
        Enemy,
        pos,
        kinematics,
        hitbox,
        hull,
        armor,
        PositionHistory::default(),
        fire,
        EnemyBrain::default(),
    ))
}

fn vehicle_parts(tuning: &VehicleTuning) -> (Kinematics, Hitbox, Hull, Armor, FireControl) {
    (
        Kinematics {
            max_speed: tuning.max_speed,
            acceleration: tuning.acceleration,
            turn_rate: tuning.turn_rate,
            ..Kinematics::default()
        },
        Hitbox::square(tuning.hitbox_size),
        Hull {
            internal: tuning.hull,
        },
        Armor::uniform(tuning.armor),
        FireControl::new(tuning.fire_rate),
    )
}

/// Spawn a machine-gun round `muzzle_offset` ahead of `origin` along `direction`.
/// The round inherits the shooter's heading and flies at constant speed.
pub fn spawn_projectile(
    world: &mut World,
    weapon: &WeaponTuning,
    owner: Entity,
    origin: Position,
    direction: f64,
) -> Entity {
    let muzzle = origin.offset(offset_for_direction_and_distance(
        direction,
        weapon.muzzle_offset,
    ));
    let mut kinematics = Kinematics {
        current_speed: weapon.speed,
        max_speed: weapon.speed,
        ..Kinematics::default()
    };
    kinematics.set_direction(direction);

    world.spawn((
        muzzle,
        kinematics,
        Hitbox::square(weapon.size),
        ProjectileState::new(entity_id(owner), weapon.fuel, weapon.damage),
    ))
}
