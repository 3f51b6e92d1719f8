//! Steering behaviors.
//!
//! A behavior looks at one boid and every other object on the canvas and
//! returns the steering vector for this step. The simulation owns the active
//! strategy and passes it into each computation, so swapping strategies never
//! touches the boids themselves.

use crate::config::SimulationConfig;
use crate::entity::SpaceObject;
use crate::vector::Vector2D;

/// Trait for boid steering strategies
pub trait SteeringBehavior {
    /// `neighbors` may contain `boid` itself; it is skipped by identity.
    fn compute_steering(
        &self,
        boid: &SpaceObject,
        neighbors: &[&SpaceObject],
        config: &SimulationConfig,
    ) -> Vector2D;
}

/// Steering strategies selectable at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteeringStrategy {
    #[default]
    Flocking,
    Pursuit,
}

impl SteeringBehavior for SteeringStrategy {
    fn compute_steering(
        &self,
        boid: &SpaceObject,
        neighbors: &[&SpaceObject],
        config: &SimulationConfig,
    ) -> Vector2D {
        match self {
            SteeringStrategy::Flocking => Flocking.compute_steering(boid, neighbors, config),
            SteeringStrategy::Pursuit => Pursuit.compute_steering(boid, neighbors, config),
        }
    }
}

/// Separation, alignment and cohesion plus ship avoidance
#[derive(Debug, Clone, Copy, Default)]
pub struct Flocking;

impl SteeringBehavior for Flocking {
    fn compute_steering(
        &self,
        boid: &SpaceObject,
        neighbors: &[&SpaceObject],
        config: &SimulationConfig,
    ) -> Vector2D {
        flocking_forces(boid, neighbors, config).total()
    }
}

/// Aggressive boids chase the ship; everyone else flocks
#[derive(Debug, Clone, Copy, Default)]
pub struct Pursuit;

impl SteeringBehavior for Pursuit {
    fn compute_steering(
        &self,
        boid: &SpaceObject,
        neighbors: &[&SpaceObject],
        config: &SimulationConfig,
    ) -> Vector2D {
        if !boid.is_aggressive() {
            return Flocking.compute_steering(boid, neighbors, config);
        }

        let ship = neighbors
            .iter()
            .find(|other| other.is_ship() && other.id != boid.id);

        match ship {
            Some(ship) => {
                let attack = (ship.position - boid.position)
                    .set_magnitude(config.max_speed * 2.0)
                    .limit(config.max_force * 1.5);
                attack + crowd_separation(boid, neighbors, config)
            }
            None => Flocking.compute_steering(boid, neighbors, config),
        }
    }
}

/// The individual contributions of one flocking pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockingForces {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    /// Not clamped to `max_force`
    pub ship_avoidance: Vector2D,
}

impl FlockingForces {
    pub fn total(&self) -> Vector2D {
        self.separation + self.alignment + self.cohesion + self.ship_avoidance
    }
}

/// Desired direction to a steering force: set speed, subtract current velocity, clamp.
pub fn steer(desired: Vector2D, velocity: Vector2D, config: &SimulationConfig) -> Vector2D {
    (desired.set_magnitude(config.max_speed) - velocity).limit(config.max_force)
}

/// Unit vector away from `from`, weighted by inverse distance.
fn away_from(position: Vector2D, from: Vector2D, distance: f32) -> Vector2D {
    (position - from).normalize() / distance
}

/// Evaluates all flocking rules in a single pass over `neighbors`.
pub fn flocking_forces(
    boid: &SpaceObject,
    neighbors: &[&SpaceObject],
    config: &SimulationConfig,
) -> FlockingForces {
    let aggressive = boid.is_aggressive();

    let mut separation = Vector2D::zero();
    let mut separation_count = 0;
    let mut ship_avoidance = Vector2D::zero();
    let mut cohesion = Vector2D::zero();
    let mut cohesion_count = 0;
    let mut alignment = Vector2D::zero();
    let mut alignment_count = 0;

    for other in neighbors {
        if other.id == boid.id {
            continue;
        }

        let distance = boid.position.distance(&other.position);
        let separating = distance > 0.0 && distance < config.separation_radius;

        if separating && !(aggressive && other.is_ship()) {
            separation += away_from(boid.position, other.position, distance);
            separation_count += 1;
        }

        if separating && other.is_ship() && !aggressive {
            let away = away_from(boid.position, other.position, distance);
            ship_avoidance = (separation + away) * config.ship_presence_factor;
        }

        if other.is_boid() {
            if distance < config.cohesion_radius {
                cohesion += other.position;
                cohesion_count += 1;
            }
            if distance < config.perception_radius {
                alignment += other.velocity;
                alignment_count += 1;
            }
        }
    }

    let separation = if separation_count > 0 {
        steer(separation / separation_count as f32, boid.velocity, config)
    } else {
        Vector2D::zero()
    };

    let alignment = if alignment_count > 0 {
        steer(alignment / alignment_count as f32, boid.velocity, config)
    } else {
        Vector2D::zero()
    };

    let cohesion = if cohesion_count > 0 {
        let center = cohesion / cohesion_count as f32;
        steer(center - boid.position, boid.velocity, config)
    } else {
        Vector2D::zero()
    };

    FlockingForces {
        separation,
        alignment,
        cohesion,
        ship_avoidance,
    }
}

/// Boid-only separation at half the usual radius, used while attacking.
fn crowd_separation(
    boid: &SpaceObject,
    neighbors: &[&SpaceObject],
    config: &SimulationConfig,
) -> Vector2D {
    let radius = config.separation_radius / 2.0;
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in neighbors {
        if other.id == boid.id || other.is_ship() {
            continue;
        }
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < radius {
            sum += away_from(boid.position, other.position, distance);
            count += 1;
        }
    }

    if count > 0 {
        steer(sum / count as f32, boid.velocity, config)
    } else {
        Vector2D::zero()
    }
}
