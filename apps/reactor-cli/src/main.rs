use anyhow::Context as _;
use clap::{Parser, Subcommand};
use reactor_kernel::{
    DerivedVisualParams, EnergyState, FrameClock, Reactor, ReactorConfig, ReactorPart,
};
use reactor_overlay::{CONTROL_TITLE, EnergySlider, HEADER_TEXT, StatusLevel, StatusReadout};
use reactor_render::{DebugTextRenderer, RenderView, Renderer};
use reactor_tools::ReactorInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reactor-cli", about = "Headless tool for the reactor core")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Reactor configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective configuration
    Info,
    /// Run the reactor for a number of fixed-step frames and dump the result
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Seconds per frame
        #[arg(short, long, default_value = "0.016666668")]
        delta: f32,
        /// Energy level to set before the first frame
        #[arg(short, long)]
        energy: Option<f32>,
        /// Seed for the particle field
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Remove a scene part before running (repeatable)
        #[arg(long, value_parser = parse_part)]
        unmount: Vec<ReactorPart>,
        /// Print the inspector summary as JSON instead of the text dump
        #[arg(long)]
        json: bool,
        /// Particle positions to include in the text dump
        #[arg(long, default_value = "0")]
        samples: usize,
    },
    /// Feed a raw slider value through the control and print the readout
    Readout {
        /// Raw slider value, as the control would report it
        #[arg(short, long)]
        level: String,
    },
    /// Tabulate derived parameters across a range of energy levels
    Sweep {
        #[arg(long, default_value = "0")]
        from: f32,
        #[arg(long, default_value = "100")]
        to: f32,
        #[arg(long, default_value = "10")]
        step: f32,
    },
}

fn parse_part(name: &str) -> Result<ReactorPart, String> {
    ReactorPart::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = ReactorPart::ALL.iter().map(|p| p.name()).collect();
        format!("unknown part {name:?}, expected one of: {}", known.join(", "))
    })
}

/// Upper bound on the rows a single sweep may print.
const MAX_SWEEP_ROWS: u64 = 10_000;

/// Levels `from, from + step, ..` up to and including `to`.
///
/// Each level is computed from its index, so accumulated float error neither
/// drops the endpoint nor stalls the loop.
fn sweep_levels(from: f32, to: f32, step: f32) -> anyhow::Result<Vec<f32>> {
    anyhow::ensure!(
        step.is_finite() && step > 0.0,
        "step must be positive, got {step}"
    );
    anyhow::ensure!(
        from.is_finite() && to.is_finite(),
        "sweep bounds must be finite, got {from}..{to}"
    );
    if to < from {
        return Ok(Vec::new());
    }
    let last = ((to - from) / step + 1e-4).floor();
    anyhow::ensure!(
        last < MAX_SWEEP_ROWS as f32,
        "sweep {from}..{to} by {step} exceeds {MAX_SWEEP_ROWS} rows"
    );
    let last = last as u64;
    Ok((0..=last).map(|i| from + i as f32 * step).collect())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = ReactorConfig::load_or_default(cli.config.as_deref())
        .context("loading reactor config")?;

    match cli.command {
        Commands::Info => {
            println!("reactor-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", reactor_render::crate_info());
            println!(
                "particles: count={} range={} y_range={} speed={}",
                config.particles.count,
                config.particles.range,
                config.particles.y_range,
                config.particles.speed
            );
            println!(
                "energy: initial={} critical_threshold={}",
                config.energy.initial, config.energy.critical_threshold
            );
            println!(
                "palette: safe={} danger={}",
                config.palette.safe.to_hex(),
                config.palette.danger.to_hex()
            );
        }
        Commands::Simulate {
            frames,
            delta,
            energy,
            seed,
            unmount,
            json,
            samples,
        } => {
            let state = EnergyState::new(config.energy.initial);
            let mut reactor = Reactor::with_seed(&config, state.clone(), seed)?;
            if let Some(level) = energy {
                state.set(level);
            }
            for part in unmount {
                if reactor.scene_mut().unmount(part).is_some() {
                    tracing::info!(part = part.name(), "unmounted");
                }
            }

            let mut clock = FrameClock::new();
            for _ in 0..frames {
                let t = clock.advance(delta);
                reactor.update(t.elapsed, t.delta);
            }

            if json {
                let summary = ReactorInspector::summary(&reactor);
                let parts = ReactorInspector::list_parts(&reactor);
                let out = serde_json::json!({ "summary": summary, "parts": parts });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let renderer = DebugTextRenderer::with_particle_samples(samples);
                print!("{}", renderer.render(&reactor, &RenderView::default()));
                println!("{}", ReactorInspector::summary(&reactor));
            }
        }
        Commands::Readout { level } => {
            let state = EnergyState::new(config.energy.initial);
            let mut slider = EnergySlider::new(state.clone());
            let wrote = slider.change_str(&level)?;
            tracing::debug!(wrote, value = slider.value(), "slider change");

            let readout = StatusReadout::with_threshold(
                state,
                config.palette,
                config.energy.critical_threshold,
            )
            .read();
            println!("{HEADER_TEXT}: {}", readout.status);
            println!("{CONTROL_TITLE}: {}", readout.percent_text());
            println!("color: {}", readout.color.to_hex());
        }
        Commands::Sweep { from, to, step } => {
            let levels = sweep_levels(from, to, step)?;
            println!(
                "{:>8} {:>10} {:>8} {:>9} {:>8}",
                "level", "normalized", "speed", "color", "status"
            );
            for level in levels {
                let p = DerivedVisualParams::compute(level, 0.0, &config.palette);
                let status = StatusLevel::classify(level, config.energy.critical_threshold);
                println!(
                    "{:>8.1} {:>10.3} {:>8.3} {:>9} {:>8}",
                    level,
                    p.normalized_energy,
                    p.speed,
                    p.color.to_hex(),
                    status.label()
                );
            }
        }
    }

    Ok(())
}
