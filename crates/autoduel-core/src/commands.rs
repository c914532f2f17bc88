//! Commands sent from the input/launcher layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// One tick of player input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Requested heading in degrees.
    pub heading: f64,
    /// Throttle as a fraction of top speed (stick magnitude, may be signed).
    pub throttle: f64,
    /// Trigger held.
    pub fire: bool,
}

/// All possible external actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Spawn the configured roster and start ticking.
    StartMatch,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,

    // --- Player vehicle ---
    /// Apply a frame of player input.
    Input { frame: InputFrame },

    // --- World management ---
    /// Remove a vehicle at the end of the next tick (e.g. wrecked).
    RemoveVehicle { vehicle_id: EntityId },
}
