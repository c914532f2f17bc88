//! map-prep: arena map generator and checker.
//!
//! Usage:
//!   map-prep arena --size 1000,800 --output arena.json
//!   map-prep synthetic --size 2000,2000 --obstacles 30 --seed 7 --output world_map.json
//!   map-prep check world_map.json

use std::path::PathBuf;
use std::process;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use autoduel_core::constants::{ENEMY_SPAWNS, PLAYER_SPAWN, VEHICLE_HITBOX_SIZE};
use autoduel_core::types::Rect;
use autoduel_map::map::write_map;
use autoduel_map::{arena_perimeter, bounds, load_map, WallDescriptor};

/// Free space kept around each spawn point.
const SPAWN_CLEARANCE: f64 = 40.0;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "arena" => cmd_arena(&args[2..]),
        "synthetic" => cmd_synthetic(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "map-prep: AUTODUEL arena map tool\n\
         \n\
         Commands:\n\
         \n\
         arena     Write a walled rectangular arena\n\
         \n\
           --size <w,h>        Interior size (default: 1000,1000)\n\
           --thickness <N>     Wall thickness (default: 20)\n\
           --output <path>     Output JSON path\n\
         \n\
         synthetic Write a walled arena with random interior obstacles\n\
         \n\
           --size <w,h>        Interior size (default: 1000,1000)\n\
           --thickness <N>     Wall thickness (default: 20)\n\
           --obstacles <N>     Obstacle count (default: 12)\n\
           --seed <N>          RNG seed (default: 42)\n\
           --output <path>     Output JSON path\n\
         \n\
         check     Load a map and report its walls and bounds\n\
         \n\
           <path>              Map JSON to check\n\
         \n\
         Examples:\n\
         \n\
           map-prep arena --size 1000,800 --output arena.json\n\
           map-prep synthetic --obstacles 30 --seed 7 --output world_map.json\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_size(args: &[String]) -> (f64, f64) {
    let Some(value) = parse_value(args, "--size") else {
        return (1000.0, 1000.0);
    };
    let parts: Vec<&str> = value.split(',').collect();
    match parts.as_slice() {
        [w, h] => match (w.parse::<f64>(), h.parse::<f64>()) {
            (Ok(w), Ok(h)) if w > 0.0 && h > 0.0 => (w, h),
            _ => fail(&format!("--size expects two positive numbers, got `{value}`")),
        },
        _ => fail(&format!("--size expects <width,height>, got `{value}`")),
    }
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match parse_value(args, flag) {
        Some(value) => value
            .parse()
            .unwrap_or_else(|_| fail(&format!("{flag} expects a number, got `{value}`"))),
        None => default,
    }
}

fn parse_output(args: &[String]) -> PathBuf {
    match parse_value(args, "--output") {
        Some(path) => PathBuf::from(path),
        None => fail("--output <path> is required"),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn write_or_exit(walls: &[WallDescriptor], output: &PathBuf) {
    eprintln!("Writing {} walls to {}...", walls.len(), output.display());
    match write_map(walls, output) {
        Ok(()) => {
            let file_size = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
            eprintln!("Done! Output: {} ({} bytes)", output.display(), file_size);
        }
        Err(e) => fail(&format!("writing map: {e}")),
    }
}

// --- Arena command ---

fn cmd_arena(args: &[String]) {
    let (width, height) = parse_size(args);
    let thickness: f64 = parse_number(args, "--thickness", 20.0);
    let output = parse_output(args);

    eprintln!("Arena interior {width}×{height}, walls {thickness} thick");
    write_or_exit(&arena_perimeter(width, height, thickness), &output);
}

// --- Synthetic arena command ---

fn cmd_synthetic(args: &[String]) {
    let (width, height) = parse_size(args);
    let thickness: f64 = parse_number(args, "--thickness", 20.0);
    let obstacles: usize = parse_number(args, "--obstacles", 12);
    let seed: u64 = parse_number(args, "--seed", 42);
    let output = parse_output(args);

    eprintln!("Generating {obstacles} obstacles in a {width}×{height} arena (seed {seed})...");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut walls = arena_perimeter(width, height, thickness);
    let placed = scatter_obstacles(&mut rng, width, height, obstacles, &mut walls);
    if placed < obstacles {
        eprintln!("Placed {placed} of {obstacles} obstacles; the arena is crowded.");
    }

    write_or_exit(&walls, &output);
}

/// Drop up to `count` random blocks inside the arena without overlapping
/// existing walls or the stock spawn points. Returns the number placed.
fn scatter_obstacles(
    rng: &mut ChaCha8Rng,
    width: f64,
    height: f64,
    count: usize,
    walls: &mut Vec<WallDescriptor>,
) -> usize {
    let keep_clear: Vec<Rect> = std::iter::once(PLAYER_SPAWN)
        .chain(ENEMY_SPAWNS.iter().copied())
        .map(|(x, y)| {
            Rect::new(
                x - SPAWN_CLEARANCE,
                y - SPAWN_CLEARANCE,
                VEHICLE_HITBOX_SIZE + 2.0 * SPAWN_CLEARANCE,
                VEHICLE_HITBOX_SIZE + 2.0 * SPAWN_CLEARANCE,
            )
        })
        .collect();

    let max_side = (width.min(height) / 8.0).max(10.0);
    let mut placed = 0;
    let mut attempts = 0;

    while placed < count && attempts < count * 50 {
        attempts += 1;
        let w = rng.gen_range(10.0..=max_side);
        let h = rng.gen_range(10.0..=max_side);
        if w >= width || h >= height {
            continue;
        }
        let candidate = WallDescriptor::new(
            rng.gen_range(0.0..width - w),
            rng.gen_range(0.0..height - h),
            w.round(),
            h.round(),
        );
        let rect = candidate.rect();
        let blocked = walls.iter().any(|wall| wall.rect().intersects(&rect))
            || keep_clear.iter().any(|zone| zone.intersects(&rect));
        if !blocked {
            walls.push(candidate);
            placed += 1;
        }
    }
    placed
}

// --- Check command ---

fn cmd_check(args: &[String]) {
    let Some(path) = args.first() else {
        fail("check needs a map path");
    };
    let walls = load_map(&PathBuf::from(path)).unwrap_or_else(|e| fail(&e.to_string()));

    eprintln!("{}: {} walls", path, walls.len());
    match bounds(&walls) {
        Some(b) => eprintln!(
            "Bounds: x {}..{}, y {}..{} ({}×{})",
            b.x,
            b.right(),
            b.y,
            b.bottom(),
            b.width,
            b.height
        ),
        None => eprintln!("Bounds: empty map"),
    }

    let mut overlaps = 0;
    for (i, a) in walls.iter().enumerate() {
        for b in &walls[i + 1..] {
            if a.rect().intersects(&b.rect()) {
                overlaps += 1;
            }
        }
    }
    if overlaps > 0 {
        eprintln!("Note: {overlaps} overlapping wall pairs");
    }
}
