use core::f32::consts::TAU;

/// Square root that works with and without `std`
pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    #[cfg(feature = "std")]
    {
        angle.sin_cos()
    }
    #[cfg(not(feature = "std"))]
    {
        (libm::sinf(angle), libm::cosf(angle))
    }
}

fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

/// Wraps an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle % TAU;
    let wrapped = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
    // -tiny % TAU + TAU rounds up to TAU in f32
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing along `angle` (radians, 0 = +x, counter-clockwise).
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = sin_cos(angle);
        Self { x: cos, y: sin }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Returns the unit vector, or the zero vector when the length is zero.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    /// Rescales to `magnitude`. The zero vector stays zero.
    pub fn set_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    /// Caps the length at `max`, leaving shorter vectors untouched.
    pub fn limit(&self, max: f32) -> Self {
        let mag = self.magnitude();
        if mag > max {
            let normalized = self.normalize();
            Self {
                x: normalized.x * max,
                y: normalized.y * max,
            }
        } else {
            *self
        }
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        sqrt(dx * dx + dy * dy)
    }

    /// Angle of the vector in `[0, 2π)`.
    pub fn heading(&self) -> f32 {
        normalize_angle(atan2(self.y, self.x))
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl core::ops::MulAssign<f32> for Vector2D {
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::PI;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_vector(rng: &mut StdRng, span: f32) -> Vector2D {
        Vector2D::new(rng.gen_range(-span..span), rng.gen_range(-span..span))
    }

    #[test]
    fn test_vector2d_magnitude() {
        let v = Vector2D::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_vector2d_operations() {
        let v1 = Vector2D::new(1.0, 2.0);
        let v2 = Vector2D::new(3.0, 4.0);

        let sum = v1 + v2;
        assert_eq!(sum, Vector2D::new(4.0, 6.0));

        let diff = v2 - v1;
        assert_eq!(diff, Vector2D::new(2.0, 2.0));

        let scaled = v1 * 2.0;
        assert_eq!(scaled, Vector2D::new(2.0, 4.0));

        let halved = v2 / 2.0;
        assert_eq!(halved, Vector2D::new(1.5, 2.0));

        assert_eq!(-v1, Vector2D::new(-1.0, -2.0));
    }

    #[test]
    fn test_normalize_has_unit_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_vector(&mut rng, 500.0);
            if v.magnitude() > 0.0 {
                assert_abs_diff_eq!(v.normalize().magnitude(), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        let n = Vector2D::zero().normalize();
        assert_eq!(n, Vector2D::zero());
        assert!(!n.x.is_nan() && !n.y.is_nan());
    }

    #[test]
    fn test_set_magnitude_of_zero_is_noop() {
        assert_eq!(Vector2D::zero().set_magnitude(10.0), Vector2D::zero());
        assert_abs_diff_eq!(
            Vector2D::new(0.0, -2.0).set_magnitude(10.0).y,
            -10.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_limit_caps_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let v = random_vector(&mut rng, 50.0);
            let cap = rng.gen_range(0.0..40.0);
            let limited = v.limit(cap);
            assert!(limited.magnitude() <= cap + 1e-4);
            if v.magnitude() <= cap {
                assert_eq!(limited, v);
            }
        }
    }

    #[test]
    fn test_distance() {
        let a = Vector2D::new(0.0, 0.0);
        let b = Vector2D::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_heading_and_from_angle() {
        assert_abs_diff_eq!(Vector2D::new(0.0, 1.0).heading(), PI / 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Vector2D::new(0.0, -1.0).heading(), 1.5 * PI, epsilon = 1e-6);
        let v = Vector2D::from_angle(PI);
        assert_abs_diff_eq!(v.x, -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        assert_abs_diff_eq!(normalize_angle(-0.1), TAU - 0.1, epsilon = 1e-5);
        assert_abs_diff_eq!(normalize_angle(TAU + 0.25), 0.25, epsilon = 1e-5);
        assert_eq!(normalize_angle(0.0), 0.0);
        let tiny = normalize_angle(-1e-9);
        assert!((0.0..TAU).contains(&tiny));
    }
}
