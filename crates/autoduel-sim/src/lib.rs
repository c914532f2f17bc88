//! Simulation engine for AUTODUEL.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces GameStateSnapshots for renderers and telemetry.

pub mod collision;
pub mod config;
pub mod engine;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use autoduel_core as core;
pub use config::SimConfig;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
