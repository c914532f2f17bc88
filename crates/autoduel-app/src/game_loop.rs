//! Game loop thread: runs the simulation engine at a fixed rate and hands
//! snapshots to the telemetry sink.
//!
//! The engine is created by the launcher and moved into this thread.
//! Commands arrive via an `mpsc` channel. The latest snapshot is stored in
//! shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use autoduel_core::commands::PlayerCommand;
use autoduel_core::state::GameStateSnapshot;
use autoduel_sim::engine::SimulationEngine;

use crate::input::InputProvider;
use crate::sink::FrameSink;
use crate::state::GameLoopCommand;
use crate::wreck::WreckPolicy;

/// How the loop is paced and when it stops.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub tick_rate: u32,
    /// Sleep between ticks to hold `tick_rate` against the wall clock.
    pub realtime: bool,
    /// Stop after this many ticks; 0 runs until shutdown.
    pub max_ticks: u64,
}

impl LoopOptions {
    /// Nominal duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.tick_rate.max(1) as u64)
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Default)]
pub struct LoopSummary {
    pub ticks: u64,
    pub last_snapshot: Option<GameStateSnapshot>,
}

/// Engine plus its external collaborators, stepped one tick at a time.
pub struct GameLoop {
    engine: SimulationEngine,
    input: Box<dyn InputProvider + Send>,
    sink: Box<dyn FrameSink + Send>,
    wrecks: Option<WreckPolicy>,
    ticks: u64,
}

impl GameLoop {
    pub fn new(
        engine: SimulationEngine,
        input: Box<dyn InputProvider + Send>,
        sink: Box<dyn FrameSink + Send>,
        wreck_removal: bool,
    ) -> Self {
        Self {
            engine,
            input,
            sink,
            wrecks: wreck_removal.then(WreckPolicy::new),
            ticks: 0,
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.engine.queue_command(command);
    }

    /// Poll input, advance the engine one tick, apply the wreck policy, and
    /// write the snapshot to the sink.
    pub fn step(&mut self) -> io::Result<GameStateSnapshot> {
        if let Some(frame) = self.input.frame(self.engine.time().tick) {
            self.engine.queue_command(PlayerCommand::Input { frame });
        }

        let snapshot = self.engine.tick();
        self.ticks += 1;

        if let Some(policy) = self.wrecks.as_mut() {
            self.engine.queue_commands(policy.wrecks(&snapshot));
        }

        self.sink.write_frame(&snapshot)?;
        Ok(snapshot)
    }

    /// Step `ticks` times without pacing or a command channel.
    pub fn run_for_ticks(&mut self, ticks: u64) -> io::Result<LoopSummary> {
        let mut last_snapshot = None;
        for _ in 0..ticks {
            last_snapshot = Some(self.step()?);
        }
        self.sink.flush()?;
        Ok(LoopSummary {
            ticks: self.ticks,
            last_snapshot,
        })
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
pub fn spawn_game_loop(
    game: GameLoop,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<io::Result<LoopSummary>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("autoduel-game-loop".into())
        .spawn(move || run_game_loop(game, options, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, or the tick limit.
fn run_game_loop(
    mut game: GameLoop,
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> io::Result<LoopSummary> {
    let tick_duration = options.tick_duration();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Input(frame)) => {
                    game.queue_command(PlayerCommand::Input { frame });
                }
                Ok(GameLoopCommand::Command(cmd)) => game.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return finish(game, latest_snapshot),
                Err(mpsc::TryRecvError::Empty) => break,
                // Launcher dropped its sender; keep running to the tick limit.
                Err(mpsc::TryRecvError::Disconnected) if options.max_ticks > 0 => break,
                Err(mpsc::TryRecvError::Disconnected) => return finish(game, latest_snapshot),
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = match game.step() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("telemetry sink failed: {}", err);
                return Err(err);
            }
        };

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.max_ticks > 0 && game.ticks >= options.max_ticks {
            return finish(game, latest_snapshot);
        }

        // 4. Sleep until next tick
        if !options.realtime {
            continue;
        }
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

fn finish(
    mut game: GameLoop,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> io::Result<LoopSummary> {
    game.sink.flush()?;
    let last_snapshot = latest_snapshot.lock().ok().and_then(|s| s.clone());
    log::info!("game loop stopped after {} ticks", game.ticks);
    Ok(LoopSummary {
        ticks: game.ticks,
        last_snapshot,
    })
}
