//! State shared between the launcher thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use autoduel_core::commands::{InputFrame, PlayerCommand};
use autoduel_core::state::GameStateSnapshot;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Player input for the next tick, overriding the input provider.
    Input(InputFrame),
    /// A command to forward to the simulation engine.
    Command(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared launcher state.
///
/// `mpsc::Sender` is Send but not Sync, so it sits behind a `Mutex`; the
/// latest snapshot is shared with the game loop thread through an `Arc`.
pub struct AppState {
    /// Channel sender into the game loop. `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a message to the game loop. Returns false if it is not running.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard
                .as_ref()
                .is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }

    /// Copy of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }
}
