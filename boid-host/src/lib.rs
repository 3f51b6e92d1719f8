//! Headless host for the boid simulation.
//!
//! Loads settings and input scripts, drives the fixed-step loop and turns
//! each step into a [`Frame`] for whatever renders it.

use anyhow::{ensure, Context, Result};
use boid_core::{Command, Simulation, SimulationConfig, SteeringStrategy};
use boid_shared::{
    Action, BoidView, Frame, MissileView, Position, ScheduledAction, ShipView, SimulationSettings,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub fn load_settings(path: &Path) -> Result<SimulationSettings> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    SimulationSettings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

/// Reads a JSON list of scheduled actions, ordered by tick.
pub fn load_script(path: &Path) -> Result<Vec<ScheduledAction>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script from {}", path.display()))?;
    let mut script: Vec<ScheduledAction> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid script in {}", path.display()))?;
    script.sort_by_key(|scheduled| scheduled.tick);
    Ok(script)
}

/// Rejects settings the simulation cannot run with.
pub fn validate(settings: &SimulationSettings) -> Result<()> {
    for (name, value) in [
        ("canvas_width", settings.canvas_width),
        ("canvas_height", settings.canvas_height),
        ("time_step", settings.time_step),
        ("ship_presence_factor", settings.ship_presence_factor),
        ("boid_radius", settings.boid_radius),
        ("ship_radius", settings.ship_radius),
        ("ship_damping", settings.ship_damping),
        ("rotation_step", settings.rotation_step),
        ("missile_radius", settings.missile_radius),
        ("missile_spawn_offset", settings.missile_spawn_offset),
    ] {
        ensure!(value.is_finite(), "{} must be finite, got {}", name, value);
    }
    ensure!(
        settings.canvas_width > 0.0 && settings.canvas_height > 0.0,
        "Canvas must have a positive size, got {}x{}",
        settings.canvas_width,
        settings.canvas_height
    );
    ensure!(
        settings.time_step > 0.0,
        "Time step must be positive, got {}",
        settings.time_step
    );
    ensure!(
        settings.boid_radius > 0.0 && settings.ship_radius > 0.0 && settings.missile_radius > 0.0,
        "Collision radii must be positive"
    );
    ensure!(
        settings.ship_damping > 0.0 && settings.ship_damping <= 1.0,
        "Ship damping must be in (0, 1], got {}",
        settings.ship_damping
    );
    ensure!(
        (0.0..=1.0).contains(&settings.aggressive_chance),
        "Aggressive chance must be in [0, 1], got {}",
        settings.aggressive_chance
    );
    for (name, value) in [
        ("max_speed", settings.max_speed),
        ("max_force", settings.max_force),
        ("initial_speed", settings.initial_speed),
        ("ship_max_speed", settings.ship_max_speed),
        ("ship_acceleration", settings.ship_acceleration),
        ("missile_speed", settings.missile_speed),
        ("missile_lifetime", settings.missile_lifetime),
        ("perception_radius", settings.perception_radius),
        ("cohesion_radius", settings.cohesion_radius),
        ("separation_radius", settings.separation_radius),
    ] {
        ensure!(
            value.is_finite() && value >= 0.0,
            "{} must be a non-negative number, got {}",
            name,
            value
        );
    }
    // Velocities are drawn from [-initial_speed, initial_speed), whose width must stay finite
    ensure!(
        settings.initial_speed < f32::MAX / 2.0,
        "Initial speed is too large, got {}",
        settings.initial_speed
    );
    Ok(())
}

pub fn to_config(settings: &SimulationSettings) -> SimulationConfig {
    SimulationConfig {
        canvas_width: settings.canvas_width,
        canvas_height: settings.canvas_height,
        time_step: settings.time_step,
        flock_count: settings.flock_count,
        max_speed: settings.max_speed,
        max_force: settings.max_force,
        perception_radius: settings.perception_radius,
        cohesion_radius: settings.cohesion_radius,
        separation_radius: settings.separation_radius,
        ship_presence_factor: settings.ship_presence_factor,
        boid_radius: settings.boid_radius,
        initial_speed: settings.initial_speed,
        aggressive_chance: settings.aggressive_chance,
        ship_radius: settings.ship_radius,
        ship_max_speed: settings.ship_max_speed,
        ship_acceleration: settings.ship_acceleration,
        ship_damping: settings.ship_damping,
        rotation_step: settings.rotation_step,
        missile_speed: settings.missile_speed,
        missile_lifetime: settings.missile_lifetime,
        missile_radius: settings.missile_radius,
        missile_spawn_offset: settings.missile_spawn_offset,
        max_missiles: settings.max_missiles,
        score_per_kill: settings.score_per_kill,
        initial_lives: settings.initial_lives,
    }
}

pub fn to_command(action: Action) -> Command {
    match action {
        Action::RotateLeft => Command::RotateLeft,
        Action::RotateRight => Command::RotateRight,
        Action::Accelerate => Command::Accelerate,
        Action::Fire => Command::Fire,
    }
}

/// Snapshot of everything the renderer draws
pub fn frame(simulation: &Simulation) -> Frame {
    let ship = simulation.ship();
    Frame {
        tick: simulation.tick(),
        boids: simulation
            .boids()
            .iter()
            .map(|boid| BoidView {
                position: Position::new(boid.position.x, boid.position.y),
                rotation: boid.rotation,
                aggressive: boid.is_aggressive(),
            })
            .collect(),
        ship: ShipView {
            position: Position::new(ship.position.x, ship.position.y),
            rotation: ship.rotation,
        },
        missiles: simulation
            .active_missiles()
            .map(|missile| MissileView {
                position: Position::new(missile.position.x, missile.position.y),
            })
            .collect(),
        score: simulation.score(),
        lives: simulation.lives(),
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub steps: u64,
    pub missiles_fired: usize,
    pub boids_destroyed: usize,
    pub aggressive_destroyed: usize,
    pub boids_remaining: usize,
    pub aggressive_remaining: usize,
    pub score: u32,
    pub lives: u32,
}

pub struct Host {
    simulation: Simulation,
    script: Vec<ScheduledAction>,
    cursor: usize,
    summary: RunSummary,
}

impl Host {
    /// Validates `settings` and seeds a random flock from `seed`.
    pub fn new(settings: &SimulationSettings, seed: u64) -> Result<Self> {
        validate(settings)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let simulation = Simulation::with_random_flock(to_config(settings), &mut rng);
        Ok(Self::from_simulation(simulation))
    }

    pub fn from_simulation(simulation: Simulation) -> Self {
        Self {
            simulation,
            script: Vec::new(),
            cursor: 0,
            summary: RunSummary::default(),
        }
    }

    pub fn with_script(mut self, mut script: Vec<ScheduledAction>) -> Self {
        script.sort_by_key(|scheduled| scheduled.tick);
        self.script = script;
        self.cursor = 0;
        self
    }

    pub fn with_steering(mut self, steering: SteeringStrategy) -> Self {
        self.simulation.set_steering(steering);
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Applies the actions due this tick, then steps once.
    pub fn advance(&mut self) {
        let tick = self.simulation.tick();
        // Actions scheduled for ticks already passed are dropped
        while let Some(scheduled) = self.script.get(self.cursor) {
            if scheduled.tick > tick {
                break;
            }
            if scheduled.tick == tick {
                log::debug!("Tick {}: {:?}", tick, scheduled.action);
                if self.simulation.apply(to_command(scheduled.action)).is_some() {
                    self.summary.missiles_fired += 1;
                }
            }
            self.cursor += 1;
        }

        let report = self.simulation.step();
        for destroyed in &report.destroyed {
            self.summary.boids_destroyed += 1;
            if destroyed.aggressive {
                self.summary.aggressive_destroyed += 1;
            }
        }
        self.summary.steps += 1;
    }

    /// Runs up to `steps` steps, writing one JSON frame per line to `frames` when given.
    ///
    /// With `stop_when_cleared` the run ends early once no aggressive boid is left.
    pub fn run<W: Write>(
        &mut self,
        steps: u64,
        stop_when_cleared: bool,
        mut frames: Option<&mut W>,
    ) -> Result<RunSummary> {
        for _ in 0..steps {
            self.advance();

            if let Some(out) = frames.as_mut() {
                serde_json::to_writer(&mut **out, &frame(&self.simulation))
                    .context("Failed to write frame")?;
                out.write_all(b"\n").context("Failed to write frame")?;
            }

            if stop_when_cleared && self.simulation.is_cleared() {
                log::info!("All aggressive boids destroyed at tick {}", self.simulation.tick());
                break;
            }
        }

        if let Some(out) = frames.as_mut() {
            out.flush().context("Failed to flush frames")?;
        }

        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            boids_remaining: self.simulation.boids().len(),
            aggressive_remaining: self.simulation.aggressive_remaining(),
            score: self.simulation.score(),
            lives: self.simulation.lives(),
            ..self.summary.clone()
        }
    }
}
