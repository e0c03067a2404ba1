//! Headless voxland session: generate a world and drive the player with a
//! scripted input sequence at a fixed timestep.
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --seed <SEED>     Noise seed (default: config or 12345)
//!   --size <N>        Columns per side of the plane (default: config or 90)
//!   --ticks <N>       Number of simulated frames (default: 600)
//!   --config <PATH>   Scene config JSON; missing fields take defaults
//!   --fly             Enable fly mode

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use log::{error, info};

use voxland::core::input::InputState;
use voxland::core::logging;
use voxland::render::InstancedBatches;
use voxland::terrain::PerlinField;
use voxland::voxel::VoxelCategory;
use voxland::{SceneConfig, WorldState};

const DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> voxland::core::Result<()> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => SceneConfig::load(Path::new(&path))?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(args, "--seed") {
        config.terrain.seed = seed;
    }
    if let Some(size) = parse_u32_arg(args, "--size") {
        config.terrain.plane_size = size;
    }
    if args.iter().any(|a| a == "--fly") {
        config.movement.fly_enabled = true;
    }
    let ticks = parse_u32_arg(args, "--ticks").unwrap_or(600);

    println!("=== Voxland ===");
    println!("Plane: {}x{}", config.terrain.plane_size, config.terrain.plane_size);
    println!("Seed:  {}", config.terrain.seed);
    println!("Fly:   {}", config.movement.fly_enabled);
    println!();

    let start = Instant::now();
    let noise = PerlinField::new(config.terrain.seed);
    let mut world = WorldState::generate(&config, &noise, InstancedBatches::new())?;
    let elapsed = start.elapsed();

    for category in VoxelCategory::ALL {
        println!("{:>6}: {} voxels", category, world.terrain().store(category).len());
    }
    println!("Generated in {:.1}ms", elapsed.as_secs_f64() * 1000.0);
    println!();

    let mut input = InputState::new();
    let mut jumps = 0;
    let mut breaks = 0;
    let mut uploaded = upload_dirty(&mut world);
    for frame in 0..ticks {
        script(frame, &mut input);
        let outcome = world.tick(&mut input, DT)?;
        uploaded += upload_dirty(&mut world);
        if outcome.jumped {
            jumps += 1;
        }
        if outcome.landed {
            info!("Landed at frame {} ({:?})", frame, world.player().position);
        }
        if outcome.break_target.is_some() {
            breaks += 1;
        }
    }

    let player = world.player();
    println!("Simulated {} frames ({:.1}s)", ticks, ticks as f32 * DT);
    println!("Jumps: {}, blocks broken: {}", jumps, breaks);
    println!("Player position: {:?}", player.position);
    println!("Player velocity: {:?}", player.velocity);
    println!("Horizontal speed: {:.2}", player.horizontal_speed());
    println!("Grounded: {}", player.grounded);
    println!("Instances left: {}", world.renderer().total_instances());
    println!("Instance bytes uploaded: {}", uploaded);
    Ok(())
}

/// Bytes a GPU host would re-upload for batches changed since the last call
fn upload_dirty(world: &mut WorldState<InstancedBatches>) -> usize {
    world
        .renderer_mut()
        .take_dirty()
        .into_iter()
        .filter_map(|handle| world.renderer().batch(handle))
        .map(|batch| batch.as_bytes().len())
        .sum()
}

/// Settle, walk forward, jump, turn, then look down and break.
fn script(frame: u32, input: &mut InputState) {
    input.move_forward = (120..300).contains(&frame);
    input.move_right = (300..360).contains(&frame);

    match frame {
        180 | 240 => input.request_jump(),
        360..=389 => input.add_look_delta(20.0, 0.0),
        420 => input.add_look_delta(0.0, 800.0),
        450 | 480 | 510 => input.request_break(),
        _ => {}
    }
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    parse_str_arg(args, flag).and_then(|s| s.parse().ok())
}
