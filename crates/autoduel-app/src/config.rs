//! Launcher configuration, read from a single TOML file.
//!
//! Every field has a default, so an empty file runs the stock arena
//! headless for one minute of simulated time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use autoduel_core::commands::InputFrame;
use autoduel_core::constants::TICK_RATE;
use autoduel_sim::config::{SimConfig, VehicleTuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON wall list. No map means an open field.
    pub map: Option<PathBuf>,
    /// Ticks to run; 0 runs until shutdown.
    pub ticks: u64,
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
    pub telemetry: TelemetryConfig,
    /// Remove vehicles once any armor facing drops below zero.
    pub wreck_removal: bool,
    pub sim: SimConfig,
    /// Keyed player input frames.
    pub script: Vec<ScriptEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map: None,
            ticks: 60 * TICK_RATE as u64,
            tick_rate: TICK_RATE,
            realtime: false,
            telemetry: TelemetryConfig::default(),
            wreck_removal: true,
            sim: SimConfig::default(),
            script: Vec::new(),
        }
    }
}

/// Where snapshots go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryConfig {
    #[default]
    None,
    Stdout,
    File {
        path: PathBuf,
    },
}

/// A player input frame that takes effect on `tick` and holds until the next entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptEntry {
    pub tick: u64,
    pub heading: f64,
    pub throttle: f64,
    pub fire: bool,
}

impl ScriptEntry {
    pub fn frame(&self) -> InputFrame {
        InputFrame {
            heading: self.heading,
            throttle: self.throttle,
            fire: self.fire,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("{0}")]
    Validation(String),
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source: Box::new(source),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Validation("tick_rate must be > 0".into()));
        }
        validate_tuning("sim.player", &self.sim.player)?;
        validate_tuning("sim.enemy", &self.sim.enemy)?;

        let weapon = &self.sim.weapon;
        if weapon.fuel <= 0 {
            return Err(ConfigError::Validation("sim.weapon.fuel must be > 0".into()));
        }
        if !(weapon.size > 0.0 && weapon.speed.is_finite() && weapon.damage.is_finite()) {
            return Err(ConfigError::Validation(
                "sim.weapon needs a positive size and finite speed and damage".into(),
            ));
        }

        if let Some(reinforcements) = &self.sim.reinforcements {
            if !(0.0..=1.0).contains(&reinforcements.spawn_chance) {
                return Err(ConfigError::Validation(format!(
                    "sim.reinforcements.spawn_chance must be within [0, 1], got {}",
                    reinforcements.spawn_chance
                )));
            }
            if reinforcements.area.width <= 0.0 || reinforcements.area.height <= 0.0 {
                return Err(ConfigError::Validation(
                    "sim.reinforcements.area must have positive size".into(),
                ));
            }
        }

        for (index, entry) in self.script.iter().enumerate() {
            if !(-1.0..=1.0).contains(&entry.throttle) {
                return Err(ConfigError::Validation(format!(
                    "script[{index}].throttle must be within [-1, 1]"
                )));
            }
            if !entry.heading.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "script[{index}].heading must be finite"
                )));
            }
        }
        Ok(())
    }
}

fn validate_tuning(label: &str, tuning: &VehicleTuning) -> Result<(), ConfigError> {
    let values = [
        ("max_speed", tuning.max_speed),
        ("acceleration", tuning.acceleration),
        ("turn_rate", tuning.turn_rate),
        ("hull", tuning.hull),
    ];
    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{label}.{field} must be finite and >= 0"
            )));
        }
    }
    if tuning.hitbox_size <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{label}.hitbox_size must be > 0"
        )));
    }
    Ok(())
}
