//! Player input providers.
//!
//! Device polling lives outside the simulation. Providers hand the game loop
//! at most one `InputFrame` per tick; a tick without a frame leaves the
//! player's last intent in place.

use autoduel_core::commands::InputFrame;

use crate::config::ScriptEntry;

/// Source of player input frames.
pub trait InputProvider {
    /// Frame to apply on `tick`, if the intent changes.
    fn frame(&mut self, tick: u64) -> Option<InputFrame>;
}

/// No input at all.
#[derive(Debug, Default)]
pub struct IdleInput;

impl InputProvider for IdleInput {
    fn frame(&mut self, _tick: u64) -> Option<InputFrame> {
        None
    }
}

/// Replays keyed frames from a script.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    entries: Vec<ScriptEntry>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by_key(|e| e.tick);
        Self { entries, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }
}

impl InputProvider for ScriptedInput {
    /// Latest entry keyed at or before `tick` that has not been played yet.
    fn frame(&mut self, tick: u64) -> Option<InputFrame> {
        let mut latest = None;
        while let Some(entry) = self.entries.get(self.cursor) {
            if entry.tick > tick {
                break;
            }
            latest = Some(entry.frame());
            self.cursor += 1;
        }
        latest
    }
}
