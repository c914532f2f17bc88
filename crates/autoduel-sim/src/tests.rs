//! Tests for the simulation engine: kinematics, collision, damage,
//! projectiles, enemy control, and the match lifecycle.

use test_log::test;

use autoduel_core::commands::{InputFrame, PlayerCommand};
use autoduel_core::components::*;
use autoduel_core::enums::*;
use autoduel_core::events::SimEvent;
use autoduel_core::state::GameStateSnapshot;
use autoduel_core::types::{Position, Rect};
use autoduel_map::WallDescriptor;

use crate::config::{ReinforcementConfig, RosterConfig, SimConfig, VehicleTuning, WeaponTuning};
use crate::engine::SimulationEngine;
use crate::world_setup::{self, entity_id};

/// Engine with no roster, already in the Active phase.
fn empty_engine() -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        roster: RosterConfig::empty(),
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine
}

fn spawn_player_at(engine: &mut SimulationEngine, x: f64, y: f64) -> hecs::Entity {
    world_setup::spawn_player(
        engine.world_mut(),
        &VehicleTuning::player(),
        Position::new(x, y),
    )
}

fn spawn_enemy_at(engine: &mut SimulationEngine, x: f64, y: f64) -> hecs::Entity {
    world_setup::spawn_enemy(
        engine.world_mut(),
        &VehicleTuning::enemy(),
        Position::new(x, y),
    )
}

fn position_of(engine: &SimulationEngine, entity: hecs::Entity) -> Position {
    *engine.world().get::<&Position>(entity).unwrap()
}

fn kinematics_of(engine: &SimulationEngine, entity: hecs::Entity) -> Kinematics {
    *engine.world().get::<&Kinematics>(entity).unwrap()
}

/// Zero turn rate, so an aligned car keeps its heading instead of swinging
/// around it.
fn lock_heading(engine: &mut SimulationEngine, entity: hecs::Entity) {
    engine
        .world_mut()
        .get::<&mut Kinematics>(entity)
        .unwrap()
        .turn_rate = 0.0;
}

fn should_fire_of(engine: &SimulationEngine, enemy: hecs::Entity) -> bool {
    engine.world().get::<&EnemyBrain>(enemy).unwrap().should_fire
}

fn set_speed(engine: &mut SimulationEngine, entity: hecs::Entity, speed: f64) {
    engine
        .world_mut()
        .get::<&mut Kinematics>(entity)
        .unwrap()
        .current_speed = speed;
}

fn input(heading: f64, throttle: f64, fire: bool) -> PlayerCommand {
    PlayerCommand::Input {
        frame: InputFrame {
            heading,
            throttle,
            fire,
        },
    }
}

fn json(snapshot: &GameStateSnapshot) -> String {
    serde_json::to_string(snapshot).unwrap()
}

// ---- Match lifecycle ----

#[test]
fn test_new_engine_is_in_setup() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Setup);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.vehicles.is_empty());
}

#[test]
fn test_start_match_spawns_roster() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();

    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.time.tick, 1);
    assert!(snap.player().is_some());
    assert_eq!(snap.enemies().count(), 4);
    assert_eq!(snap.score.enemies_remaining, 4);

    let player = snap.player().unwrap();
    assert_eq!(player.armor, Armor::uniform(100.0));
    assert_eq!(player.position, Position::new(150.0, 150.0));
    for enemy in snap.enemies() {
        assert_eq!(enemy.armor, Armor::uniform(50.0));
        assert_eq!(enemy.ai_mode, Some(EnemyMode::Patrol));
    }
}

#[test]
fn test_start_match_twice_is_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();
    assert_eq!(snap.enemies().count(), 4);
}

#[test]
fn test_pause_and_resume() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    engine.tick();
    engine.tick();
    let before = engine.time().tick;

    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, GamePhase::Paused);
    assert_eq!(paused.time.tick, before);
    let frozen = json(&paused);
    assert_eq!(json(&engine.tick()), frozen);

    engine.queue_command(PlayerCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, GamePhase::Active);
    assert_eq!(resumed.time.tick, before + 1);
}

#[test]
fn test_load_map_spawns_walls() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let walls = vec![
        WallDescriptor::new(0.0, 0.0, 100.0, 10.0),
        WallDescriptor::new(0.0, 90.0, 100.0, 10.0),
    ];
    assert_eq!(engine.load_map(&walls), 2);
    let snap = engine.tick();
    assert_eq!(snap.walls.len(), 2);
    assert_eq!(snap.walls[0].rect, Rect::new(0.0, 0.0, 100.0, 10.0));
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        reinforcements: Some(ReinforcementConfig {
            spawn_chance: 0.1,
            min_enemies: 6,
            ..Default::default()
        }),
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    engine_a.queue_command(PlayerCommand::StartMatch);
    engine_b.queue_command(PlayerCommand::StartMatch);

    for tick in 0..300 {
        let heading = (tick * 7 % 360) as f64;
        engine_a.queue_command(input(heading, 1.0, tick % 3 == 0));
        engine_b.queue_command(input(heading, 1.0, tick % 3 == 0));

        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        assert_eq!(json(&snap_a), json(&snap_b), "Snapshots diverged with same seed");
    }
}

#[test]
fn test_reinforcements_follow_seed() {
    let config = |seed| SimConfig {
        seed,
        roster: RosterConfig::empty(),
        reinforcements: Some(ReinforcementConfig {
            min_enemies: 3,
            spawn_chance: 1.0,
            area: Rect::new(0.0, 0.0, 1000.0, 1000.0),
            max_attempts: 8,
        }),
        ..Default::default()
    };
    // Below the minimum every tick spawns; at the minimum spawning stops.
    let mut engine = SimulationEngine::new(config(7));
    engine.queue_command(PlayerCommand::StartMatch);
    let mut snap = engine.tick();
    for _ in 0..5 {
        snap = engine.tick();
    }
    assert_eq!(snap.score.enemies_remaining, 3);
    assert_eq!(snap.score.reinforcements, 3);

    let spawned = |seed| {
        let mut engine = SimulationEngine::new(config(seed));
        engine.queue_command(PlayerCommand::StartMatch);
        match engine.tick().events.as_slice() {
            [SimEvent::EnemySpawned { position, .. }] => *position,
            other => panic!("expected one spawn, got {other:?}"),
        }
    };
    assert_eq!(spawned(7), spawned(7));
    assert_ne!(spawned(7), spawned(8));
}

#[test]
fn test_reinforcements_avoid_walls() {
    let mut engine = SimulationEngine::new(SimConfig {
        roster: RosterConfig::empty(),
        reinforcements: Some(ReinforcementConfig {
            min_enemies: 1,
            spawn_chance: 1.0,
            area: Rect::new(0.0, 0.0, 100.0, 100.0),
            max_attempts: 200,
        }),
        ..Default::default()
    });
    // Only the top-right corner of the area is open.
    engine.load_map(&[
        WallDescriptor::new(0.0, 0.0, 100.0, 60.0),
        WallDescriptor::new(0.0, 60.0, 60.0, 40.0),
    ]);
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();

    for enemy in snap.enemies() {
        let footprint = Rect::new(enemy.position.x, enemy.position.y, 20.0, 20.0);
        for wall in &snap.walls {
            assert!(!footprint.intersects(&wall.rect));
        }
    }
}

// ---- Player input and kinematics ----

#[test]
fn test_input_sets_speed_and_turns_toward_heading() {
    let mut engine = SimulationEngine::new(SimConfig {
        roster: RosterConfig {
            player: Some(Position::new(150.0, 150.0)),
            enemies: Vec::new(),
        },
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMatch);
    engine.queue_command(input(90.0, 1.0, false));
    let snap = engine.tick();

    let player = snap.player().unwrap();
    assert_eq!(player.speed, 4.0);
    // Moved along the old heading, then turned one step.
    assert_eq!(player.position, Position::new(150.0, 154.0));
    assert_eq!(player.direction, 2.0);

    for _ in 0..44 {
        engine.tick();
    }
    let player = engine.player().unwrap();
    assert_eq!(kinematics_of(&engine, player).current_direction, 90.0);
}

#[test]
fn test_zero_throttle_keeps_requested_heading() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);

    engine.queue_command(input(350.0, 1.0, false));
    engine.tick();
    // Releasing the stick stops the car but the turn continues.
    engine.queue_command(input(0.0, 0.0, false));
    engine.tick();

    let kin = kinematics_of(&engine, player);
    assert_eq!(kin.current_speed, 0.0);
    assert_eq!(kin.current_direction, 356.0);
}

#[test]
fn test_movement_records_history() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    lock_heading(&mut engine, player);
    set_speed(&mut engine, player, 1.0);

    for _ in 0..25 {
        engine.tick();
    }

    assert_eq!(position_of(&engine, player), Position::new(0.0, 25.0));
    let history = *engine.world().get::<&PositionHistory>(player).unwrap();
    assert!(history.is_full());
    assert_eq!(history.newest(), Some(Position::new(0.0, 24.0)));
    assert_eq!(history.oldest(), Some(Position::new(0.0, 5.0)));
}

// ---- Collision ----

#[test]
fn test_rollback_to_seventeen_ticks_back() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    lock_heading(&mut engine, player);
    engine.load_map(&[WallDescriptor::new(0.0, 40.0, 10.0, 4.0)]);
    set_speed(&mut engine, player, 1.0);

    // Ticks 1..=21 move the car to y = 21 without contact.
    for _ in 0..21 {
        engine.tick();
    }
    assert_eq!(position_of(&engine, player), Position::new(0.0, 21.0));

    let snap = engine.tick();
    assert_eq!(position_of(&engine, player), Position::new(0.0, 4.0));
    let kin = kinematics_of(&engine, player);
    assert_eq!(kin.current_speed, 0.0);
    assert_eq!(kin.current_acceleration, 0.0);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::Collision { other: EntityKind::Wall, rolled_back_to, .. }
            if *rolled_back_to == Position::new(0.0, 4.0)
    )));
}

#[test]
fn test_overlap_without_history_stops_in_place() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    engine.load_map(&[WallDescriptor::new(0.0, 4.0, 10.0, 4.0)]);
    set_speed(&mut engine, player, 5.0);

    engine.tick();

    assert_eq!(position_of(&engine, player), Position::new(0.0, 0.0));
    assert_eq!(kinematics_of(&engine, player).current_speed, 0.0);
}

#[test]
fn test_short_history_rolls_back_to_oldest() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    lock_heading(&mut engine, player);
    engine.load_map(&[WallDescriptor::new(0.0, 30.0, 10.0, 4.0)]);
    set_speed(&mut engine, player, 1.0);

    // Contact is first seen at y = 11 with only 11 history entries.
    for _ in 0..12 {
        engine.tick();
    }
    assert_eq!(position_of(&engine, player), Position::new(0.0, 0.0));
}

#[test]
fn test_held_throttle_drives_on_after_rollback() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    lock_heading(&mut engine, player);
    engine.load_map(&[WallDescriptor::new(0.0, 100.0, 10.0, 4.0)]);
    engine.queue_command(input(0.0, 1.0, false));

    // Contact is first seen at y = 84 on tick 22.
    for _ in 0..22 {
        engine.tick();
    }
    assert_eq!(position_of(&engine, player), Position::new(0.0, 16.0));
    assert_eq!(kinematics_of(&engine, player).current_speed, 0.0);

    // No new frame arrives; the held throttle gets the car moving again.
    engine.tick();
    assert_eq!(kinematics_of(&engine, player).current_speed, 4.0);
    assert_eq!(position_of(&engine, player), Position::new(0.0, 20.0));
}

#[test]
fn test_vehicle_contact_rolls_back_both_cars() {
    let mut engine = empty_engine();
    let a = spawn_player_at(&mut engine, 0.0, 0.0);
    let b = spawn_enemy_at(&mut engine, 10.0, 10.0);

    let snap = engine.tick();

    assert_eq!(kinematics_of(&engine, a).current_speed, 0.0);
    assert_eq!(kinematics_of(&engine, b).current_speed, 0.0);
    let collisions = snap
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Collision { .. }))
        .count();
    assert_eq!(collisions, 2);
    // A vehicle contact is not a wall contact.
    assert!(!engine.world().get::<&EnemyBrain>(b).unwrap().detected_wall);
}

#[test]
fn test_wall_contact_flips_enemy_next_tick() {
    let mut engine = empty_engine();
    let enemy = spawn_enemy_at(&mut engine, 0.0, 0.0);
    engine.load_map(&[WallDescriptor::new(5.0, 5.0, 50.0, 50.0)]);

    // Tick 1: patrol turn, then the collision pass flags the wall.
    engine.tick();
    assert_eq!(kinematics_of(&engine, enemy).current_direction, 2.0);
    assert!(engine.world().get::<&EnemyBrain>(enemy).unwrap().detected_wall);

    // Tick 2: the controller consumes the flag and turns around.
    let snap = engine.tick();
    let view = snap.enemies().next().unwrap();
    assert_eq!(view.direction, 182.0);
    assert_eq!(view.ai_mode, Some(EnemyMode::WallEvade));
}

// ---- Projectiles and damage ----

#[test]
fn test_projectile_expires_after_fuel() {
    let mut engine = empty_engine();
    let owner = engine.world_mut().spawn(());
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        owner,
        Position::new(0.0, 0.0),
        90.0,
    );

    for _ in 0..49 {
        let snap = engine.tick();
        assert_eq!(snap.projectiles.len(), 1);
    }
    let last = engine.tick();
    assert!(last.projectiles.is_empty());
    assert!(last
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ProjectileExpired { owner: o } if *o == entity_id(owner))));
}

#[test]
fn test_projectile_flies_straight() {
    let mut engine = empty_engine();
    let owner = engine.world_mut().spawn(());
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        owner,
        Position::new(0.0, 0.0),
        0.0,
    );
    let snap = engine.tick();
    let round = &snap.projectiles[0];
    assert_eq!(round.position, Position::new(0.0, 25.0));
    assert_eq!(round.fuel, 49);
}

#[test]
fn test_fire_rate_gates_shots() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 0.0);
    lock_heading(&mut engine, player);

    engine.queue_command(input(0.0, 0.0, true));
    let first = engine.tick();
    let second = engine.tick();
    assert!(first.projectiles.is_empty());
    assert!(second.projectiles.is_empty());

    let third = engine.tick();
    assert_eq!(third.projectiles.len(), 1);
    assert_eq!(third.score.shots_fired, 1);
    // Muzzle sits ahead of the car along its heading.
    assert_eq!(third.projectiles[0].position, Position::new(0.0, 15.0));
}

#[test]
fn test_released_trigger_stops_fire() {
    let mut engine = empty_engine();
    spawn_player_at(&mut engine, 0.0, 0.0);

    engine.queue_command(input(0.0, 0.0, true));
    engine.tick();
    engine.queue_command(input(0.0, 0.0, false));
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.score().shots_fired, 0);
}

#[test]
fn test_hit_from_behind_damages_back_armor() {
    let mut engine = empty_engine();
    let target = spawn_player_at(&mut engine, 0.0, 0.0);
    let shooter = engine.world_mut().spawn(());
    // Muzzle lands at (0, 5), inside the target's box.
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        shooter,
        Position::new(0.0, -10.0),
        0.0,
    );

    let snap = engine.tick();

    let armor = *engine.world().get::<&Armor>(target).unwrap();
    assert_eq!(armor.back, 90.0);
    assert_eq!(armor.front, 100.0);
    assert_eq!(armor.left, 100.0);
    assert_eq!(armor.right, 100.0);
    assert!(snap.projectiles.is_empty());
    assert_eq!(snap.score.hits, 1);
    assert_eq!(snap.score.damage_taken, 10.0);
}

#[test]
fn test_side_hit_damages_left_armor() {
    let mut engine = empty_engine();
    let target = spawn_player_at(&mut engine, 0.0, 0.0);
    let shooter = engine.world_mut().spawn(());
    // Heading 90 with the muzzle landing at (5, 5).
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        shooter,
        Position::new(-10.0, 5.0),
        90.0,
    );

    let snap = engine.tick();

    let armor = *engine.world().get::<&Armor>(target).unwrap();
    assert_eq!(armor.left, 90.0);
    assert_eq!(armor.back, 100.0);
    match snap.events.iter().find(|e| matches!(e, SimEvent::Damage(_))) {
        Some(SimEvent::Damage(hit)) => {
            assert_eq!(hit.facing, ArmorFacing::Left);
            assert_eq!(hit.approach, 270.0);
            assert_eq!(hit.target, entity_id(target));
        }
        other => panic!("expected damage event, got {other:?}"),
    }
}

#[test]
fn test_projectile_destroyed_by_wall() {
    let mut engine = empty_engine();
    let owner = engine.world_mut().spawn(());
    engine.load_map(&[WallDescriptor::new(-10.0, 20.0, 20.0, 20.0)]);
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        owner,
        Position::new(0.0, 10.0),
        0.0,
    );

    let snap = engine.tick();
    assert!(snap.projectiles.is_empty());
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::ProjectileExpired { .. })));
}

#[test]
fn test_armor_can_go_negative() {
    let mut engine = empty_engine();
    let target = spawn_enemy_at(&mut engine, 1000.0, 1000.0);
    engine
        .world_mut()
        .get::<&mut Armor>(target)
        .unwrap()
        .back = 5.0;
    // Freeze the target so the round meets it where it stands.
    engine
        .world_mut()
        .get::<&mut Kinematics>(target)
        .unwrap()
        .max_speed = 0.0;
    let shooter = engine.world_mut().spawn(());
    world_setup::spawn_projectile(
        engine.world_mut(),
        &WeaponTuning::default(),
        shooter,
        Position::new(1005.0, 990.0),
        2.0,
    );

    engine.tick();
    let armor = *engine.world().get::<&Armor>(target).unwrap();
    assert_eq!(armor.back, -5.0);
    assert_eq!(armor.weakest(), -5.0);
}

// ---- Enemy control ----

#[test]
fn test_enemy_pursues_player_in_radius() {
    let mut engine = empty_engine();
    spawn_player_at(&mut engine, 100.0, 0.0);
    let enemy = spawn_enemy_at(&mut engine, 0.0, 0.0);

    let snap = engine.tick();

    assert_eq!(kinematics_of(&engine, enemy).current_direction, 2.0);
    let view = snap.enemies().next().unwrap();
    assert_eq!(view.ai_mode, Some(EnemyMode::Pursuit));
    // The chase consumes the detection until the next radar check.
    assert!(!engine
        .world()
        .get::<&EnemyBrain>(enemy)
        .unwrap()
        .detected_target);
}

#[test]
fn test_enemy_patrols_without_target() {
    let mut engine = empty_engine();
    spawn_player_at(&mut engine, 1000.0, 1000.0);
    let enemy = spawn_enemy_at(&mut engine, 0.0, 0.0);

    for _ in 0..3 {
        engine.tick();
    }
    let kin = kinematics_of(&engine, enemy);
    assert_eq!(kin.current_direction, 6.0);
    assert!(kin.current_speed > 0.0);
    assert!(kin.current_speed <= kin.max_speed);
}

#[test]
fn test_aligned_enemy_fires_on_alternate_ticks() {
    let mut engine = empty_engine();
    let player = spawn_player_at(&mut engine, 0.0, 100.0);
    let enemy = spawn_enemy_at(&mut engine, 0.0, 0.0);
    // Parked, so the bearing to the player stays exactly 0.
    engine
        .world_mut()
        .get::<&mut Kinematics>(enemy)
        .unwrap()
        .max_speed = 0.0;

    // On target the controller still swings right and comes back next tick.
    let mut snap = engine.tick();
    let mut aligned = vec![should_fire_of(&engine, enemy)];
    for _ in 0..5 {
        snap = engine.tick();
        aligned.push(should_fire_of(&engine, enemy));
    }
    assert_eq!(aligned, vec![false, true, false, true, false, true]);

    // Three aligned ticks release one shot.
    assert_eq!(snap.score.shots_fired, 1);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].owner, entity_id(enemy));

    // The round spawns inside the shooter's box and must not hurt it.
    snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1);
    let own_armor = *engine.world().get::<&Armor>(enemy).unwrap();
    assert_eq!(own_armor, Armor::uniform(50.0));
    assert_eq!(
        *engine.world().get::<&Armor>(player).unwrap(),
        Armor::uniform(100.0)
    );
}

// ---- Removal ----

#[test]
fn test_remove_vehicle() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartMatch);
    let snap = engine.tick();
    let victim = snap.enemies().next().unwrap().id;

    engine.queue_command(PlayerCommand::RemoveVehicle { vehicle_id: victim });
    let snap = engine.tick();

    assert_eq!(snap.enemies().count(), 3);
    assert!(snap.vehicles.iter().all(|v| v.id != victim));
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::VehicleRemoved { vehicle, kind: EntityKind::Enemy } if *vehicle == victim
    )));
}

#[test]
fn test_remove_ignores_walls_and_unknown_ids() {
    let mut engine = empty_engine();
    engine.load_map(&[WallDescriptor::new(0.0, 0.0, 10.0, 10.0)]);
    let wall = engine.tick().walls[0].id;

    engine.queue_command(PlayerCommand::RemoveVehicle { vehicle_id: wall });
    engine.queue_command(PlayerCommand::RemoveVehicle { vehicle_id: 0 });
    let snap = engine.tick();
    assert_eq!(snap.walls.len(), 1);
}
