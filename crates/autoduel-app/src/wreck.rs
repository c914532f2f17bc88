//! Wreck policy: turns destroyed cars into removal commands.
//!
//! Armor may go negative inside the simulation. Deciding that a car is out
//! of the fight is a launcher rule, applied between ticks.

use std::collections::HashSet;

use autoduel_core::commands::PlayerCommand;
use autoduel_core::state::GameStateSnapshot;
use autoduel_core::types::EntityId;

#[derive(Debug, Default)]
pub struct WreckPolicy {
    requested: HashSet<EntityId>,
}

impl WreckPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removal commands for cars whose weakest facing is below zero.
    /// Each car is requested once; ids that left the snapshot are forgotten.
    pub fn wrecks(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        self.requested
            .retain(|id| snapshot.vehicles.iter().any(|v| v.id == *id));

        snapshot
            .vehicles
            .iter()
            .filter(|v| v.armor.weakest() < 0.0)
            .filter(|v| self.requested.insert(v.id))
            .map(|v| {
                log::info!("{:?} {} wrecked", v.kind, v.id);
                PlayerCommand::RemoveVehicle { vehicle_id: v.id }
            })
            .collect()
    }
}
