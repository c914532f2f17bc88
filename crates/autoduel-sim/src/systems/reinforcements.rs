//! Reinforcement system: tops up the enemy count during a match.
//!
//! While fewer enemies than the configured minimum remain, each tick has a
//! fixed chance of dropping a new enemy at a random clear spot in the spawn
//! area. All randomness comes from the engine's seeded RNG.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use autoduel_core::components::{Enemy, Hitbox, PositionHistory, Removed, Wall};
use autoduel_core::events::SimEvent;
use autoduel_core::types::{Position, Rect};

use crate::config::{ReinforcementConfig, VehicleTuning};
use crate::score::ScoreState;
use crate::world_setup::{entity_id, spawn_enemy};

/// Roll for a reinforcement and spawn it if the roll succeeds.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &ReinforcementConfig,
    tuning: &VehicleTuning,
    events: &mut Vec<SimEvent>,
    score: &mut ScoreState,
) {
    if enemy_count(world) >= config.min_enemies as usize {
        return;
    }
    if !rng.gen_bool(config.spawn_chance.clamp(0.0, 1.0)) {
        return;
    }

    let obstacles = occupied_rects(world);
    let Some(position) = find_clear_spot(rng, config, tuning, &obstacles) else {
        log::debug!("no clear spot for a reinforcement this tick");
        return;
    };

    let enemy = spawn_enemy(world, tuning, position);
    score.reinforcements += 1;
    log::debug!("reinforcement {:?} at ({:.0}, {:.0})", enemy, position.x, position.y);
    events.push(SimEvent::EnemySpawned {
        enemy: entity_id(enemy),
        position,
    });
}

fn enemy_count(world: &World) -> usize {
    world
        .query::<(&Enemy, Option<&Removed>)>()
        .iter()
        .filter(|(_, (_, removed))| removed.is_none())
        .count()
}

/// Footprints of walls and vehicles a new enemy must not overlap.
fn occupied_rects(world: &World) -> Vec<Rect> {
    let mut rects: Vec<Rect> = world
        .query::<(&Wall, &Position, &Hitbox)>()
        .iter()
        .map(|(_, (_, pos, hitbox))| hitbox.rect_at(pos))
        .collect();
    rects.extend(
        world
            .query::<(&Position, &Hitbox, &PositionHistory)>()
            .iter()
            .map(|(_, (pos, hitbox, _))| hitbox.rect_at(pos)),
    );
    rects
}

fn find_clear_spot(
    rng: &mut ChaCha8Rng,
    config: &ReinforcementConfig,
    tuning: &VehicleTuning,
    obstacles: &[Rect],
) -> Option<Position> {
    let area = config.area;
    let span_x = (area.width - tuning.hitbox_size).max(0.0);
    let span_y = (area.height - tuning.hitbox_size).max(0.0);

    for _ in 0..config.max_attempts {
        let pos = Position::new(
            area.x + rng.gen::<f64>() * span_x,
            area.y + rng.gen::<f64>() * span_y,
        );
        let footprint = Rect::new(pos.x, pos.y, tuning.hitbox_size, tuning.hitbox_size);
        if !obstacles.iter().any(|r| r.intersects(&footprint)) {
            return Some(pos);
        }
    }
    None
}
