use crate::vector::{normalize_angle, Vector2D};

/// Identity of an object within one simulation. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Kind-specific state carried by a [`SpaceObject`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectKind {
    Boid { aggressive: bool },
    Ship,
    Missile { active: bool, life_time: f32 },
}

/// Anything that lives on the canvas: boids, the ship and missiles
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceObject {
    pub id: EntityId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Radians in `[0, 2π)`
    pub rotation: f32,
    pub radius: f32,
    pub kind: ObjectKind,
}

impl SpaceObject {
    pub fn boid(
        id: EntityId,
        position: Vector2D,
        velocity: Vector2D,
        radius: f32,
        aggressive: bool,
    ) -> Self {
        let mut boid = Self {
            id,
            position,
            velocity,
            rotation: 0.0,
            radius,
            kind: ObjectKind::Boid { aggressive },
        };
        boid.face_velocity();
        boid
    }

    pub fn ship(id: EntityId, position: Vector2D, radius: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vector2D::zero(),
            rotation: 0.0,
            radius,
            kind: ObjectKind::Ship,
        }
    }

    pub fn missile(
        id: EntityId,
        position: Vector2D,
        velocity: Vector2D,
        rotation: f32,
        radius: f32,
        life_time: f32,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            rotation: normalize_angle(rotation),
            radius,
            kind: ObjectKind::Missile {
                active: true,
                life_time,
            },
        }
    }

    pub fn is_boid(&self) -> bool {
        matches!(self.kind, ObjectKind::Boid { .. })
    }

    pub fn is_ship(&self) -> bool {
        matches!(self.kind, ObjectKind::Ship)
    }

    pub fn is_missile(&self) -> bool {
        matches!(self.kind, ObjectKind::Missile { .. })
    }

    /// Only boids can be aggressive.
    pub fn is_aggressive(&self) -> bool {
        matches!(self.kind, ObjectKind::Boid { aggressive: true })
    }

    /// A missile that is neither deactivated nor expired. False for other kinds.
    pub fn is_live_missile(&self) -> bool {
        match self.kind {
            ObjectKind::Missile { active, life_time } => active && life_time > 0.0,
            _ => false,
        }
    }

    pub fn life_time(&self) -> Option<f32> {
        match self.kind {
            ObjectKind::Missile { life_time, .. } => Some(life_time),
            _ => None,
        }
    }

    /// Marks a missile as spent. No effect on other kinds.
    pub fn deactivate(&mut self) {
        if let ObjectKind::Missile { active, .. } = &mut self.kind {
            *active = false;
        }
    }

    /// Circle overlap test. Touching circles do not collide.
    pub fn overlaps(&self, other: &SpaceObject) -> bool {
        self.position.distance(&other.position) < self.radius + other.radius
    }

    pub fn rotate(&mut self, angle: f32) {
        self.rotation = normalize_angle(self.rotation + angle);
    }

    pub fn heading(&self) -> Vector2D {
        Vector2D::from_angle(self.rotation)
    }

    /// Points the rotation along the velocity. A stationary object keeps its rotation.
    pub fn face_velocity(&mut self) {
        if !self.velocity.is_zero() {
            self.rotation = self.velocity.heading();
        }
    }

    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    /// Toroidal wrap, each axis independently.
    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = height;
        } else if self.position.y > height {
            self.position.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::{PI, TAU};

    #[test]
    fn test_boid_creation() {
        let boid = SpaceObject::boid(
            EntityId(1),
            Vector2D::new(10.0, 20.0),
            Vector2D::new(0.0, 1.0),
            5.0,
            true,
        );

        assert_eq!(boid.position, Vector2D::new(10.0, 20.0));
        assert!(boid.is_boid());
        assert!(boid.is_aggressive());
        assert_abs_diff_eq!(boid.rotation, PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_only_boids_are_aggressive() {
        let ship = SpaceObject::ship(EntityId(0), Vector2D::zero(), 10.0);
        assert!(!ship.is_aggressive());
        assert!(ship.is_ship());
        assert_eq!(ship.life_time(), None);
    }

    #[test]
    fn test_rotation_stays_normalized() {
        let mut ship = SpaceObject::ship(EntityId(0), Vector2D::zero(), 10.0);
        ship.rotate(-0.1);
        assert_abs_diff_eq!(ship.rotation, TAU - 0.1, epsilon = 1e-5);
        for _ in 0..100 {
            ship.rotate(0.1);
            assert!((0.0..TAU).contains(&ship.rotation));
        }
    }

    #[test]
    fn test_wrap_edges() {
        let mut boid = SpaceObject::boid(
            EntityId(1),
            Vector2D::new(-1.0, -1.0),
            Vector2D::zero(),
            5.0,
            false,
        );
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2D::new(100.0, 100.0));

        boid.position = Vector2D::new(101.0, 50.0);
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2D::new(0.0, 50.0));

        boid.position = Vector2D::new(50.0, 101.0);
        boid.wrap_edges(100.0, 100.0);
        assert_eq!(boid.position, Vector2D::new(50.0, 0.0));
    }

    #[test]
    fn test_missile_lifecycle_flags() {
        let mut missile = SpaceObject::missile(
            EntityId(3),
            Vector2D::zero(),
            Vector2D::new(300.0, 0.0),
            0.0,
            3.0,
            3.0,
        );
        assert!(missile.is_live_missile());
        missile.deactivate();
        assert!(!missile.is_live_missile());
        assert_eq!(
            missile.kind,
            ObjectKind::Missile {
                active: false,
                life_time: 3.0
            }
        );
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = SpaceObject::ship(EntityId(0), Vector2D::zero(), 2.0);
        let mut b = SpaceObject::ship(EntityId(1), Vector2D::new(5.0, 0.0), 3.0);
        assert!(!a.overlaps(&b));
        b.position.x = 4.999;
        assert!(a.overlaps(&b));
    }
}
