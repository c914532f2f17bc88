//! Enemy AI for AUTODUEL.
//!
//! Implements the enemy car controller: wall avoidance, pursuit of the
//! player, patrol orbits, throttle growth, and the fire decision.

pub mod fsm;
pub mod profiles;

pub use autoduel_core as core;
