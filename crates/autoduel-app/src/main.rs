//! autoduel: headless AUTODUEL launcher.
//!
//! Usage:
//!   autoduel [config.toml] [--map world_map.json] [--ticks N] [--seed N]
//!            [--realtime] [--telemetry stdout|<path>]

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use autoduel_app::config::{AppConfig, TelemetryConfig};
use autoduel_app::error::LaunchError;
use autoduel_app::game_loop::{spawn_game_loop, GameLoop, LoopOptions, LoopSummary};
use autoduel_app::input::{IdleInput, InputProvider, ScriptedInput};
use autoduel_app::sink::{FrameSink, JsonLinesSink, NullSink};
use autoduel_app::state::AppState;
use autoduel_core::commands::PlayerCommand;
use autoduel_sim::engine::SimulationEngine;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let config = match build_config(&args[1..]) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            print_usage();
            process::exit(1);
        }
    };

    match run(config) {
        Ok(summary) => report(&summary),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "autoduel: headless vehicle-combat simulation\n\
         \n\
         Usage: autoduel [config.toml] [options]\n\
         \n\
           --map <path>         JSON wall list (overrides config)\n\
           --ticks <N>          Ticks to run, 0 = until interrupted\n\
           --seed <N>           RNG seed\n\
           --realtime           Pace ticks against the wall clock\n\
           --telemetry <dest>   'stdout' or a file path for JSON-lines snapshots\n\
         \n\
         Examples:\n\
         \n\
           autoduel --map maps/world_map.json --ticks 600 --telemetry stdout\n\
           autoduel duel.toml --seed 7\n"
    );
}

/// Config file (if any) with command-line overrides applied.
fn build_config(args: &[String]) -> Result<AppConfig, LaunchError> {
    let mut config = match args.first().filter(|a| !a.starts_with("--")) {
        Some(path) => AppConfig::load(Path::new(path))?,
        None => AppConfig::default(),
    };

    if let Some(map) = parse_flag(args, "--map") {
        config.map = Some(PathBuf::from(map));
    }
    if let Some(ticks) = parse_flag(args, "--ticks") {
        config.ticks = parse_number(ticks, "--ticks")?;
    }
    if let Some(seed) = parse_flag(args, "--seed") {
        config.sim.seed = parse_number(seed, "--seed")?;
    }
    if args.iter().any(|a| a == "--realtime") {
        config.realtime = true;
    }
    if let Some(dest) = parse_flag(args, "--telemetry") {
        config.telemetry = match dest {
            "stdout" | "-" => TelemetryConfig::Stdout,
            path => TelemetryConfig::File {
                path: PathBuf::from(path),
            },
        };
    }

    config.validate()?;
    Ok(config)
}

fn parse_flag<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number(value: &str, flag: &str) -> Result<u64, LaunchError> {
    value.parse().map_err(|_| {
        LaunchError::Config(autoduel_app::config::ConfigError::Validation(format!(
            "{flag} expects a non-negative integer, got `{value}`"
        )))
    })
}

fn run(config: AppConfig) -> Result<LoopSummary, LaunchError> {
    let mut engine = SimulationEngine::new(config.sim.clone());
    if let Some(path) = &config.map {
        let walls = autoduel_map::load_map(path)?;
        engine.load_map(&walls);
    }
    engine.queue_command(PlayerCommand::StartMatch);

    let input: Box<dyn InputProvider + Send> = if config.script.is_empty() {
        Box::new(IdleInput)
    } else {
        Box::new(ScriptedInput::new(config.script.clone()))
    };
    let sink: Box<dyn FrameSink + Send> = match &config.telemetry {
        TelemetryConfig::None => Box::new(NullSink),
        TelemetryConfig::Stdout => Box::new(JsonLinesSink::stdout()),
        TelemetryConfig::File { path } => Box::new(JsonLinesSink::create(path)?),
    };

    let game = GameLoop::new(engine, input, sink, config.wreck_removal);
    let options = LoopOptions {
        tick_rate: config.tick_rate,
        realtime: config.realtime,
        max_ticks: config.ticks,
    };

    let state = AppState::new();
    let (command_tx, handle) =
        spawn_game_loop(game, options, Arc::clone(&state.latest_snapshot))?;
    if let Ok(mut tx) = state.command_tx.lock() {
        *tx = Some(command_tx);
    }

    log::info!(
        "running {} at {} Hz",
        if config.ticks == 0 {
            "until interrupted".to_string()
        } else {
            format!("{} ticks", config.ticks)
        },
        config.tick_rate
    );

    let summary = handle.join().map_err(|_| LaunchError::LoopPanicked)??;
    Ok(summary)
}

fn report(summary: &LoopSummary) {
    let Some(last) = &summary.last_snapshot else {
        eprintln!("No ticks were run.");
        return;
    };
    let score = &last.score;
    eprintln!(
        "Ran {} ticks ({:.1}s simulated). Shots {}, hits {}, damage dealt {:.0}, taken {:.0}, \
         enemies remaining {}, reinforcements {}.",
        summary.ticks,
        last.time.elapsed_secs,
        score.shots_fired,
        score.hits,
        score.damage_dealt,
        score.damage_taken,
        score.enemies_remaining,
        score.reinforcements
    );
    match last.player() {
        Some(player) => eprintln!(
            "Player at ({:.0}, {:.0}), armor f{:.0} b{:.0} l{:.0} r{:.0}.",
            player.position.x,
            player.position.y,
            player.armor.front,
            player.armor.back,
            player.armor.left,
            player.armor.right
        ),
        None => eprintln!("Player wrecked."),
    }
}
