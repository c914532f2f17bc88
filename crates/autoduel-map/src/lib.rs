//! Arena maps for AUTODUEL.
//!
//! Loads and validates wall layouts from JSON and builds bounded arenas.

pub use autoduel_core as core;

pub mod arena;
pub mod error;
pub mod map;

// Re-export key types for convenience.
pub use arena::{arena_perimeter, bounds};
pub use error::MapError;
pub use map::{load_map, parse_map, WallDescriptor};
