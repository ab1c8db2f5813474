//! rampart-probe: headless driver for the targeting core.
//!
//! Usage:
//!   rampart-probe run --scenario scenarios/stacked_wave.json --frames 120
//!   rampart-probe solve --to 100,0 --speed 2 --angle 45
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr,
//! results to stdout as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use rampart_core::commands::ShotCommand;
use rampart_core::config::TargetingConfig;
use rampart_core::types::{Defender, Hostile, Position};
use rampart_solver::{BallisticSolver, ShotResult};
use rampart_targeting::{DefenseState, FiredShot, TargetingCoordinator};

#[derive(Debug, Parser)]
#[command(name = "rampart-probe", about = "Probe the RAMPART targeting core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the coordinator over a static scenario snapshot.
    Run {
        /// Scenario JSON file.
        #[arg(long)]
        scenario: PathBuf,
        /// Number of frames to run.
        #[arg(long, default_value_t = 60)]
        frames: u32,
        /// Frame duration in seconds.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        frame_time: f64,
    },
    /// Run the inverse solver for one geometry.
    Solve {
        /// Defender position as `x,y`.
        #[arg(long, value_parser = parse_position, default_value = "0,0")]
        from: Position,
        /// Target position as `x,y`.
        #[arg(long, value_parser = parse_position)]
        to: Position,
        /// Target closing speed.
        #[arg(long)]
        speed: f64,
        /// Fixed launch angle in degrees (defaults to the configured angle).
        #[arg(long)]
        angle: Option<f64>,
        /// Optional config JSON file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// A world snapshot to probe against.
#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    config: TargetingConfig,
    defender: Defender,
    #[serde(default)]
    hostiles: Vec<Hostile>,
    #[serde(default = "default_playing")]
    playing: bool,
}

fn default_playing() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct FrameShot {
    frame: u32,
    fired: FiredShot,
    command: Option<ShotCommand>,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("bad y: {e}"))?;
    Ok(Position::new(x, y))
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    scenario
        .config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(scenario)
}

fn load_config(path: Option<&Path>) -> Result<TargetingConfig> {
    let Some(path) = path else {
        return Ok(TargetingConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    TargetingConfig::from_json(&text).with_context(|| format!("loading config {}", path.display()))
}

fn run_scenario(scenario: Scenario, frames: u32, frame_time: f64) -> Result<Vec<FrameShot>> {
    let mut coordinator = TargetingCoordinator::with_default_strategies(&scenario.config)?;
    let mut world = DefenseState::new(scenario.config, scenario.defender);
    world.set_playing(scenario.playing);
    for hostile in scenario.hostiles {
        world.insert_hostile(hostile);
    }

    let mut log = Vec::new();
    for frame in 0..frames {
        world.advance(frame_time);
        let report = coordinator.tick(frame_time, &mut world);
        let command = world.take_shots().into_iter().next();
        if let Some(fired) = report.shot {
            tracing::info!(frame, strategy = %fired.strategy, target = %fired.target, "fired");
            log.push(FrameShot {
                frame,
                fired,
                command,
            });
        }
    }
    Ok(log)
}

fn solve(
    from: Position,
    to: Position,
    speed: f64,
    angle: Option<f64>,
    config: &TargetingConfig,
) -> ShotResult {
    let solver = BallisticSolver::from_config(config);
    solver.inverse_from_start_fix_angle(from, to, speed, angle.unwrap_or(config.fixed_angle_deg))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run {
            scenario,
            frames,
            frame_time,
        } => {
            let loaded = load_scenario(&scenario)?;
            let shots = run_scenario(loaded, frames, frame_time)?;
            println!("{}", serde_json::to_string_pretty(&shots)?);
        }
        Command::Solve {
            from,
            to,
            speed,
            angle,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let result = solve(from, to, speed, angle, &config);
            if !result.success {
                tracing::warn!("target unreachable at this angle");
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
