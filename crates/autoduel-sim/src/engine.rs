//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use autoduel_core::commands::PlayerCommand;
use autoduel_core::components::{Enemy, Player, Removed};
use autoduel_core::enums::GamePhase;
use autoduel_core::events::SimEvent;
use autoduel_core::state::GameStateSnapshot;
use autoduel_core::types::SimTime;
use autoduel_map::WallDescriptor;

use crate::config::SimConfig;
use crate::score::ScoreState;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Add the map's walls to the world. Returns the number of walls spawned.
    pub fn load_map(&mut self, walls: &[WallDescriptor]) -> usize {
        let count = world_setup::spawn_walls(&mut self.world, walls);
        log::info!("loaded {} walls", count);
        count
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events, &self.score)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player's car, if it is in the world.
    pub fn player(&self) -> Option<Entity> {
        self.world
            .query::<&Player>()
            .iter()
            .next()
            .map(|(entity, _)| entity)
    }

    /// Get a read-only reference to the score state.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Mutable world access for tests that build scenes by hand.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if self.phase == GamePhase::Setup {
                    let player = world_setup::setup_match(&mut self.world, &self.config);
                    log::info!(
                        "match started: player {:?}, {} enemies, seed {}",
                        player,
                        self.config.roster.enemies.len(),
                        self.config.seed
                    );
                    self.score = ScoreState::default();
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Input { frame } => {
                systems::steering::apply_input(&mut self.world, &frame);
            }
            PlayerCommand::RemoveVehicle { vehicle_id } => {
                let Some(entity) = world_setup::entity_from_id(vehicle_id) else {
                    log::debug!("remove request for invalid id {}", vehicle_id);
                    return;
                };
                let is_vehicle = self.world.get::<&Player>(entity).is_ok()
                    || self.world.get::<&Enemy>(entity).is_ok();
                if !is_vehicle {
                    log::debug!("remove request for non-vehicle {}", vehicle_id);
                    return;
                }
                if self.world.insert_one(entity, Removed).is_ok() {
                    log::debug!("vehicle {} marked for removal", vehicle_id);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Held player throttle
        systems::steering::hold_throttle(&mut self.world);
        // 2. Reinforcements
        if let Some(reinforcements) = self.config.reinforcements {
            systems::reinforcements::run(
                &mut self.world,
                &mut self.rng,
                &reinforcements,
                &self.config.enemy,
                &mut self.events,
                &mut self.score,
            );
        }
        // 3. Enemy AI (reads the wall flag left by the previous collision pass)
        systems::enemy_ai::run(&mut self.world, &self.config.enemy_behavior);
        // 4. Collision on previous-tick positions (rollback, detonation, damage)
        systems::collision::run(&mut self.world, &mut self.events, &mut self.score);
        // 5. Movement integration + position history
        systems::movement::run(&mut self.world);
        // 6. Player steering
        systems::steering::run(&mut self.world);
        // 7. Projectile flight and fuel burn
        systems::projectiles::run(&mut self.world, &mut self.events);
        // 8. Fire control (trigger, rate limiter, spawn)
        systems::fire_control::run(
            &mut self.world,
            &self.config.weapon,
            &self.config.enemy_behavior,
            &mut self.events,
            &mut self.score,
        );
        // 9. Cleanup (spent projectiles, removed vehicles)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
    }
}
