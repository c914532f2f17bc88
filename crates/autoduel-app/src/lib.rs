//! AUTODUEL headless launcher.
//!
//! Wires the simulation to its external collaborators: a TOML config, the
//! map loader, an input provider, and a telemetry sink. The engine runs in a
//! dedicated game-loop thread fed through an `mpsc` channel.

pub mod config;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod sink;
pub mod state;
pub mod wreck;

pub use autoduel_core as core;
