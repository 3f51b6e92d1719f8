use anyhow::{Context, Result};
use boid_core::SteeringStrategy;
use boid_host::{load_script, load_settings, Host};
use boid_shared::SimulationSettings;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless boid swarm simulation", long_about = None)]
struct Args {
    /// JSON settings file; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON list of {"tick": n, "action": "rotate_left" | "rotate_right" | "accelerate" | "fire"}
    #[arg(short = 'i', long)]
    script: Option<PathBuf>,

    /// Number of fixed steps to simulate
    #[arg(short = 'n', long, default_value_t = 600)]
    steps: u64,

    /// Seed for the flock layout (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write one JSON frame per step to stdout
    #[arg(short, long)]
    frames: bool,

    /// Aggressive boids hunt the ship instead of flocking
    #[arg(short, long)]
    pursuit: bool,

    /// Stop as soon as every aggressive boid is destroyed
    #[arg(long)]
    stop_when_cleared: bool,

    /// Print the run summary as one JSON line on stdout (after any frames)
    #[arg(long)]
    summary_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.config {
        Some(path) => load_settings(path)?,
        None => SimulationSettings::default(),
    };
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let steering = if args.pursuit {
        SteeringStrategy::Pursuit
    } else {
        SteeringStrategy::Flocking
    };

    log::info!("Boid host starting...");
    log::info!("Seed: {}", seed);
    log::info!("Steps: {}, steering: {:?}", args.steps, steering);

    let mut host = Host::new(&settings, seed)
        .context("Failed to initialize simulation")?
        .with_script(script)
        .with_steering(steering);

    let summary = if args.frames {
        let stdout = std::io::stdout();
        let mut out = std::io::BufWriter::new(stdout.lock());
        let summary = host
            .run(args.steps, args.stop_when_cleared, Some(&mut out))
            .context("Simulation error")?;
        out.flush().context("Failed to flush frames")?;
        summary
    } else {
        host.run::<std::io::Sink>(args.steps, args.stop_when_cleared, None)
            .context("Simulation error")?
    };

    log::info!(
        "Finished after {} steps: score {}, {} boids destroyed ({} aggressive), {} remaining ({} aggressive), {} missiles fired, lives {}",
        summary.steps,
        summary.score,
        summary.boids_destroyed,
        summary.aggressive_destroyed,
        summary.boids_remaining,
        summary.aggressive_remaining,
        summary.missiles_fired,
        summary.lives
    );

    if args.summary_json {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer(&mut out, &summary).context("Failed to write summary")?;
        out.write_all(b"\n").context("Failed to write summary")?;
    }

    Ok(())
}
