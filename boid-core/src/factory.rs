use crate::config::SimulationConfig;
use crate::entity::{EntityId, SpaceObject};
use crate::vector::Vector2D;

/// Builds missiles from a firing event
#[derive(Debug, Clone, Copy)]
pub struct MissileFactory {
    pub speed: f32,
    pub radius: f32,
    pub life_time: f32,
    pub spawn_offset: f32,
}

impl MissileFactory {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            speed: config.missile_speed,
            radius: config.missile_radius,
            life_time: config.missile_lifetime,
            spawn_offset: config.missile_spawn_offset,
        }
    }

    /// A fresh missile ahead of `position`, flying along `rotation`.
    pub fn create(&self, id: EntityId, position: Vector2D, rotation: f32) -> SpaceObject {
        let heading = Vector2D::from_angle(rotation);
        SpaceObject::missile(
            id,
            position + heading * self.spawn_offset,
            heading * self.speed,
            rotation,
            self.radius,
            self.life_time,
        )
    }
}

/// Places boids uniformly on the canvas
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct BoidFactory {
    width: f32,
    height: f32,
    initial_speed: f32,
    radius: f32,
    aggressive_chance: f64,
}

#[cfg(feature = "std")]
impl BoidFactory {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            width: config.canvas_width,
            height: config.canvas_height,
            initial_speed: config.initial_speed,
            radius: config.boid_radius,
            aggressive_chance: config.aggressive_chance.clamp(0.0, 1.0),
        }
    }

    pub fn create_random<R: rand::Rng + ?Sized>(&self, id: EntityId, rng: &mut R) -> SpaceObject {
        let position = Vector2D::new(
            rng.gen_range(0.0..self.width),
            rng.gen_range(0.0..self.height),
        );
        let velocity = if self.initial_speed > 0.0 {
            Vector2D::new(
                rng.gen_range(-self.initial_speed..self.initial_speed),
                rng.gen_range(-self.initial_speed..self.initial_speed),
            )
        } else {
            Vector2D::zero()
        };
        let aggressive = rng.gen_bool(self.aggressive_chance);
        SpaceObject::boid(id, position, velocity, self.radius, aggressive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::PI;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_missile_spawns_ahead_of_ship() {
        let config = SimulationConfig::default();
        let factory = MissileFactory::new(&config);

        let missile = factory.create(EntityId(9), Vector2D::new(100.0, 100.0), PI / 2.0);

        assert_abs_diff_eq!(missile.position.x, 100.0, epsilon = 1e-4);
        assert_abs_diff_eq!(missile.position.y, 115.0, epsilon = 1e-4);
        assert_abs_diff_eq!(missile.velocity.magnitude(), 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(missile.velocity.y, 300.0, epsilon = 1e-3);
        assert_eq!(missile.radius, 3.0);
        assert_eq!(missile.life_time(), Some(3.0));
        assert!(missile.is_live_missile());
    }

    #[test]
    fn test_random_boids_stay_on_canvas() {
        let config = SimulationConfig::default();
        let factory = BoidFactory::new(&config);
        let mut rng = StdRng::seed_from_u64(42);

        for i in 0..500 {
            let boid = factory.create_random(EntityId(i), &mut rng);
            assert!((0.0..config.canvas_width).contains(&boid.position.x));
            assert!((0.0..config.canvas_height).contains(&boid.position.y));
            assert!(boid.velocity.x.abs() <= config.initial_speed);
            assert!(boid.velocity.y.abs() <= config.initial_speed);
            assert_eq!(boid.radius, config.boid_radius);
        }
    }

    #[test]
    fn test_random_boids_are_reproducible() {
        let factory = BoidFactory::new(&SimulationConfig::default());
        let mut rng1 = StdRng::seed_from_u64(12345);
        let mut rng2 = StdRng::seed_from_u64(12345);

        for i in 0..100 {
            assert_eq!(
                factory.create_random(EntityId(i), &mut rng1),
                factory.create_random(EntityId(i), &mut rng2)
            );
        }
    }

    #[test]
    fn test_aggression_follows_chance() {
        let mut config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        config.aggressive_chance = 0.0;
        let factory = BoidFactory::new(&config);
        assert!((0..50).all(|i| !factory.create_random(EntityId(i), &mut rng).is_aggressive()));

        config.aggressive_chance = 1.0;
        let factory = BoidFactory::new(&config);
        assert!((0..50).all(|i| factory.create_random(EntityId(i), &mut rng).is_aggressive()));

        config.aggressive_chance = 0.5;
        let factory = BoidFactory::new(&config);
        let aggressive = (0..1000)
            .filter(|&i| factory.create_random(EntityId(i), &mut rng).is_aggressive())
            .count();
        assert!((350..650).contains(&aggressive));
    }
}
