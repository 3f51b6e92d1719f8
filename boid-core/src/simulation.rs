use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::behavior::{steer, SteeringBehavior, SteeringStrategy};
use crate::collision;
use crate::config::SimulationConfig;
use crate::entity::{EntityId, ObjectKind, SpaceObject};
use crate::factory::MissileFactory;
use crate::vector::Vector2D;

/// Discrete requests from the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Accelerate,
    Fire,
}

/// A boid removed by a missile hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestroyedBoid {
    pub id: EntityId,
    pub aggressive: bool,
    pub position: Vector2D,
}

/// What happened during one [`Simulation::step`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub destroyed: Vec<DestroyedBoid>,
    /// Expired or spent missiles swept from the collection
    pub missiles_pruned: usize,
    pub score_gained: u32,
}

/// The whole game world: flock, ship, missiles and the running tally.
///
/// Missiles hit during a step are only deactivated; they stay in
/// [`Simulation::missiles`] until the prune at the start of the next step's
/// collision phase removes them.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    flock: Vec<SpaceObject>,
    ship: SpaceObject,
    missiles: Vec<SpaceObject>,
    steering: SteeringStrategy,
    missile_factory: MissileFactory,
    score: u32,
    lives: u32,
    tick: u64,
    next_id: u32,
}

impl Simulation {
    /// An empty flock with the ship parked at the canvas centre.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            ship: SpaceObject::ship(EntityId(0), config.canvas_center(), config.ship_radius),
            flock: Vec::new(),
            missiles: Vec::new(),
            steering: SteeringStrategy::default(),
            missile_factory: MissileFactory::new(&config),
            score: 0,
            lives: config.initial_lives,
            tick: 0,
            next_id: 1,
            config,
        }
    }

    /// A simulation with `config.flock_count` randomly placed boids.
    #[cfg(feature = "std")]
    pub fn with_random_flock<R: rand::Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Self {
        let mut simulation = Self::new(config);
        simulation.spawn_random_boids(config.flock_count, rng);
        simulation
    }

    #[cfg(feature = "std")]
    pub fn spawn_random_boids<R: rand::Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let factory = crate::factory::BoidFactory::new(&self.config);
        self.flock.reserve(count);
        for _ in 0..count {
            let id = self.allocate_id();
            self.flock.push(factory.create_random(id, rng));
        }
        log::info!(
            "Spawned {} boids ({} aggressive)",
            count,
            self.aggressive_remaining()
        );
    }

    pub fn add_boid(&mut self, position: Vector2D, velocity: Vector2D, aggressive: bool) -> EntityId {
        let id = self.allocate_id();
        self.flock.push(SpaceObject::boid(
            id,
            position,
            velocity,
            self.config.boid_radius,
            aggressive,
        ));
        id
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn boids(&self) -> &[SpaceObject] {
        &self.flock
    }

    pub fn ship(&self) -> &SpaceObject {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut SpaceObject {
        &mut self.ship
    }

    /// Includes missiles deactivated this step that are still waiting to be pruned.
    pub fn missiles(&self) -> &[SpaceObject] {
        &self.missiles
    }

    pub fn active_missiles(&self) -> impl Iterator<Item = &SpaceObject> + '_ {
        self.missiles.iter().filter(|missile| missile.is_live_missile())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Initialized from the config; the simulation itself never changes it.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Number of completed steps
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn steering(&self) -> SteeringStrategy {
        self.steering
    }

    pub fn set_steering(&mut self, steering: SteeringStrategy) {
        if steering != self.steering {
            log::debug!("Steering switched from {:?} to {:?}", self.steering, steering);
        }
        self.steering = steering;
    }

    pub fn aggressive_remaining(&self) -> usize {
        self.flock.iter().filter(|boid| boid.is_aggressive()).count()
    }

    /// True once no aggressive boid is left.
    pub fn is_cleared(&self) -> bool {
        self.aggressive_remaining() == 0
    }

    /// Applies one input request. Returns the new missile id for a successful `Fire`.
    pub fn apply(&mut self, command: Command) -> Option<EntityId> {
        match command {
            Command::RotateLeft => self.rotate_ship(-self.config.rotation_step),
            Command::RotateRight => self.rotate_ship(self.config.rotation_step),
            Command::Accelerate => self.accelerate_ship(),
            Command::Fire => return self.fire_missile(),
        }
        None
    }

    pub fn rotate_ship(&mut self, angle: f32) {
        self.ship.rotate(angle);
    }

    /// One frame of thrust along the ship's heading, capped at the ship's max speed.
    pub fn accelerate_ship(&mut self) {
        let thrust = self.ship.heading() * (self.config.ship_acceleration * self.config.time_step);
        self.ship.velocity = (self.ship.velocity + thrust).limit(self.config.ship_max_speed);
    }

    /// Launches a missile from the ship unless the missile cap is reached.
    ///
    /// Spent missiles awaiting pruning still count against the cap.
    pub fn fire_missile(&mut self) -> Option<EntityId> {
        if let Some(max) = self.config.max_missiles {
            if self.missiles.len() >= max {
                log::debug!("Missile cap of {} reached, fire ignored", max);
                return None;
            }
        }

        let id = self.allocate_id();
        let missile = self
            .missile_factory
            .create(id, self.ship.position, self.ship.rotation);
        log::debug!(
            "Missile {} fired at ({:.1}, {:.1})",
            id.0,
            missile.position.x,
            missile.position.y
        );
        self.missiles.push(missile);
        Some(id)
    }

    /// Advances the world by one fixed time step.
    pub fn step(&mut self) -> StepReport {
        let dt = self.config.time_step;

        self.advance_flock(dt);
        self.advance_ship(dt);
        self.advance_missiles(dt);
        let missiles_pruned = self.prune_missiles();

        let mut report = self.resolve_collisions();
        report.missiles_pruned = missiles_pruned;

        self.tick += 1;
        report
    }

    fn advance_flock(&mut self, dt: f32) {
        let config = self.config;

        // Every boid steers against the pre-step state of the world
        let forces: Vec<Vector2D> = {
            let neighbors: Vec<&SpaceObject> = self
                .flock
                .iter()
                .chain(core::iter::once(&self.ship))
                .collect();
            self.flock
                .iter()
                .map(|boid| self.steering.compute_steering(boid, &neighbors, &config))
                .collect()
        };

        for (boid, force) in self.flock.iter_mut().zip(forces) {
            if !force.is_zero() {
                boid.velocity += steer(force, boid.velocity, &config) * dt;
            }
            boid.velocity = boid.velocity.limit(config.max_speed);
            boid.integrate(dt);
            boid.wrap_edges(config.canvas_width, config.canvas_height);
            boid.face_velocity();
        }
    }

    fn advance_ship(&mut self, dt: f32) {
        self.ship.integrate(dt);
        self.ship.velocity *= self.config.ship_damping;
        self.ship
            .wrap_edges(self.config.canvas_width, self.config.canvas_height);
    }

    fn advance_missiles(&mut self, dt: f32) {
        for missile in self.missiles.iter_mut() {
            let ObjectKind::Missile { active, life_time } = &mut missile.kind else {
                continue;
            };
            if !*active {
                continue;
            }
            missile.position += missile.velocity * dt;
            *life_time -= dt;
        }
    }

    fn prune_missiles(&mut self) -> usize {
        let before = self.missiles.len();
        self.missiles.retain(SpaceObject::is_live_missile);
        let pruned = before - self.missiles.len();
        if pruned > 0 {
            log::trace!("Pruned {} missiles", pruned);
        }
        pruned
    }

    fn resolve_collisions(&mut self) -> StepReport {
        let mut doomed = BTreeSet::new();
        let mut spent = BTreeSet::new();

        for (a, b) in collision::detect(&self.flock, &self.missiles) {
            for object in [a, b] {
                match object.kind {
                    ObjectKind::Boid { .. } => {
                        doomed.insert(object.id);
                    }
                    ObjectKind::Missile { .. } => {
                        spent.insert(object.id);
                    }
                    ObjectKind::Ship => {}
                }
            }
        }

        let mut report = StepReport::default();
        if doomed.is_empty() && spent.is_empty() {
            return report;
        }

        self.flock.retain(|boid| {
            if !doomed.contains(&boid.id) {
                return true;
            }
            log::debug!(
                "Boid {} destroyed at ({:.1}, {:.1})",
                boid.id.0,
                boid.position.x,
                boid.position.y
            );
            report.destroyed.push(DestroyedBoid {
                id: boid.id,
                aggressive: boid.is_aggressive(),
                position: boid.position,
            });
            false
        });

        for missile in self.missiles.iter_mut() {
            if spent.contains(&missile.id) {
                missile.deactivate();
            }
        }

        report.score_gained = self.config.score_per_kill * report.destroyed.len() as u32;
        self.score = self.score.saturating_add(report.score_gained);
        report
    }
}
