//! Running score state tracked by the engine.

/// Counters accumulated over a match.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub shots_fired: u32,
    pub hits: u32,
    /// Armor the player removed from other vehicles.
    pub damage_dealt: f64,
    /// Armor other vehicles removed from the player.
    pub damage_taken: f64,
    pub reinforcements: u32,
}
