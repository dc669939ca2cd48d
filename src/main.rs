//! Ball Chaos entry point
//!
//! Runs the simulation headless on a fixed-delay loop. Rendering and sound
//! are left to whatever consumes the frame dump and the cue events.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use ball_chaos::sim::{SimEvent, Simulation, tick};
use ball_chaos::{Preset, SimConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "Balls bouncing in a gapped arena, doubling on every escape", long_about = None)]
struct Args {
    /// Arena preset: circle, rotating or square
    #[arg(long, default_value = "circle", value_parser = parse_preset)]
    preset: Preset,
    /// JSON config file (replaces the preset)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,
    /// Stop once this many balls are alive
    #[arg(long, default_value_t = 5000)]
    max_bodies: usize,
    /// Delay between ticks in milliseconds (defaults to the config value)
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Log the ball count every N ticks (0 = never)
    #[arg(long, default_value_t = 100)]
    report_every: u64,
    /// Write the final frame as JSON
    #[arg(long)]
    dump: Option<PathBuf>,
    /// Write the effective config as JSON and continue
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::from_str(s).ok_or_else(|| format!("unknown preset '{s}' (expected circle, rotating or square)"))
}

/// Why the main loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    TickBudget,
    PopulationCap,
}

/// Stop signal, polled once per tick
fn stop_signal(sim: &Simulation, args: &Args) -> Option<StopReason> {
    if args.ticks.is_some_and(|limit| sim.time_ticks >= limit) {
        return Some(StopReason::TickBudget);
    }
    if sim.population() >= args.max_bodies {
        return Some(StopReason::PopulationCap);
    }
    None
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimConfig::from_preset(args.preset),
    };
    config.validate().context("invalid configuration")?;

    if let Some(path) = &args.write_config {
        config.save(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let delay = Duration::from_millis(args.delay_ms.unwrap_or(config.tick_delay_ms));

    log::info!(
        "Ball Chaos starting ({}, seed {}, {} ms/tick)",
        args.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| args.preset.as_str().to_string()),
        seed,
        delay.as_millis()
    );

    let mut sim = Simulation::new(config, seed);

    let reason = loop {
        if let Some(reason) = stop_signal(&sim, &args) {
            break reason;
        }

        let report = tick(&mut sim);
        for event in &report.events {
            match event {
                SimEvent::Bounce { body_id } => log::trace!("cue: bounce ({body_id})"),
                SimEvent::Escape { body_id } => log::debug!("cue: escape ({body_id})"),
            }
        }

        if args.report_every > 0 && sim.time_ticks % args.report_every == 0 {
            log::info!(
                "Tick {}: Balls: {} ({} escapes)",
                sim.time_ticks,
                sim.population(),
                sim.escapes
            );
        }

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    };

    log::info!(
        "Stopped ({:?}) after {} ticks with {} balls",
        reason,
        sim.time_ticks,
        sim.population()
    );

    if let Some(path) = &args.dump {
        let json = sim.frame().to_json().context("serializing final frame")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Final frame written to {}", path.display());
    }

    Ok(())
}
