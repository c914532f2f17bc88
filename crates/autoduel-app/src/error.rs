//! Launcher errors.

use thiserror::Error;

use autoduel_map::MapError;

use crate::config::ConfigError;

/// Anything that can stop the launcher before or during a run.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("telemetry: {0}")]
    Telemetry(#[from] std::io::Error),
    #[error("game loop thread panicked")]
    LoopPanicked,
}
