use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;
use crossterm::tty::IsTty;
use myxo_core::{init_logging, Metrics, SimConfig, World};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Stop after this many ticks (runs until interrupted otherwise)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Override the RNG seed from the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run as fast as possible instead of pacing to the configured FPS
    #[arg(long)]
    unpaced: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = if std::path::Path::new(&args.config).exists() {
        SimConfig::load(&args.config)?
    } else {
        tracing::info!(path = %args.config, "No config file found, using defaults");
        SimConfig::default()
    };
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    // resolve the seed up front so every run is reproducible from its log
    let seed = config.world.seed.unwrap_or_else(rand::random);
    config.world.seed = Some(seed);

    tracing::info!(
        seed = seed,
        fingerprint = %config.fingerprint(),
        width = config.world.width,
        height = config.world.height,
        agents = config.world.agents,
        "Starting simulation"
    );

    let frame_budget = Duration::from_micros(1_000_000 / config.target_fps);
    let mut world = World::new(config)?;
    let metrics = Metrics::new();

    let interactive = std::io::stdin().is_tty();
    if interactive {
        terminal::enable_raw_mode()?;
    }
    let result = run(
        &mut world,
        &metrics,
        args.ticks,
        frame_budget,
        !args.unpaced,
        interactive,
    );
    if interactive {
        terminal::disable_raw_mode()?;
    }
    result?;

    let frame = world.export_color_buffer();
    let lit_cells = frame
        .data
        .chunks_exact(3)
        .filter(|px| px.iter().any(|&v| v > 0))
        .count();
    let peak = frame.data.iter().copied().max().unwrap_or(0);
    tracing::info!(
        ticks = metrics.tick_count(),
        ticks_per_second = metrics.ticks_per_second(),
        lit_cells = lit_cells,
        peak_intensity = peak,
        "Simulation finished"
    );
    Ok(())
}

fn run(
    world: &mut World,
    metrics: &Metrics,
    max_ticks: Option<u64>,
    frame_budget: Duration,
    paced: bool,
    interactive: bool,
) -> Result<()> {
    loop {
        if let Some(max) = max_ticks {
            if world.tick >= max {
                break;
            }
        }

        let started = Instant::now();
        world.tick();
        metrics.record_tick(started.elapsed(), world.agents.len());

        // stop requests are honored only between ticks
        if interactive && event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    tracing::info!(tick = world.tick, "Interrupt received, stopping");
                    break;
                }
            }
        }

        if paced {
            let elapsed = started.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
    }
    Ok(())
}
