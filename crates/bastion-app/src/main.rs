//! Headless BASTION session: runs the game loop in real time, logs what
//! happens, and prints the final score.
//!
//! Usage:
//!   cargo run -p bastion-app -- --seed 7 --max-secs 30
//!   RUST_LOG=bastion_sim=debug cargo run -p bastion-app

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::filter::EnvFilter;

use bastion_app::config::load_config;
use bastion_app::game_loop::{spawn_game_loop, LoopConfig, DEFAULT_FPS};
use bastion_app::state::{latest, shared_frame};
use bastion_core::commands::PlayerCommand;
use bastion_sim::engine::SimulationEngine;

#[derive(Parser, Debug)]
#[command(name = "bastion")]
#[command(about = "Run a headless BASTION turret-defense session")]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Frame rate of the game loop
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,
    /// End the session after this many seconds
    #[arg(long)]
    max_secs: Option<f64>,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    ensure!(args.fps > 0, "--fps must be positive");
    let deadline = match args.max_secs {
        Some(secs) => {
            ensure!(secs.is_finite() && secs > 0.0, "--max-secs must be positive, got {secs}");
            Some(Instant::now() + Duration::from_secs_f64(secs))
        }
        None => None,
    };

    println!("Starting session (seed {})", config.seed);
    let engine = SimulationEngine::new(config).context("invalid simulation config")?;
    let shared = shared_frame();
    let handle = spawn_game_loop(
        engine,
        shared.clone(),
        LoopConfig {
            fps: args.fps,
            stop_on_game_over: true,
        },
    )
    .context("failed to spawn game loop thread")?;
    ensure!(
        handle.send(PlayerCommand::StartGame),
        "game loop exited before the session started"
    );

    while !handle.is_finished() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            if !handle.send(PlayerCommand::EndGame) {
                warn!("session already over at the time limit");
            }
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    let final_state = handle.join().context("game loop thread panicked")?;
    let published = latest(&shared);

    println!();
    println!("=== SESSION OVER ===");
    println!("  Score:      {}", final_state.score);
    println!("  Frames:     {}", final_state.frame);
    println!("  Enemies:    {}", final_state.enemies.len());
    if let Some(frame) = published {
        println!("  FPS:        {:.1}", frame.fps);
    }
    Ok(())
}
