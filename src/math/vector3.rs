use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};

/// A 3D displacement with `f64` components.
///
/// The same kind rules as in 2D apply: `Vector ± Vector = Vector`,
/// `Point ± Vector = Point`, `Point - Point = Vector`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// The displacement from `a` to `b`.
    #[must_use]
    pub fn between(a: Point3, b: Point3) -> Self {
        b - a
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared Euclidean length.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scales the vector to unit length in place.
    ///
    /// A zero vector is left unchanged, avoiding a division by zero at
    /// the cost of a non-unit result.
    pub fn normalize(&mut self) -> &mut Self {
        let d = self.magnitude();
        if d != 0.0 {
            self.x /= d;
            self.y /= d;
            self.z /= d;
        }
        self
    }

    /// Value-returning twin of [`normalize`](Self::normalize).
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects the vector about a unit `normal`.
    #[must_use]
    pub fn reflect(&self, normal: &Self) -> Self {
        let d = 2.0 * self.dot(normal);
        Self::new(
            self.x - d * normal.x,
            self.y - d * normal.y,
            self.z - d * normal.z,
        )
    }

    /// Rotates the vector around `axis` through `theta` radians
    /// (right-hand rule) using Rodrigues' formula.
    ///
    /// The axis does not need to be unit length.
    #[must_use]
    pub fn rotate_around(&self, axis: &Self, theta: f64) -> Self {
        let (x, y, z) = (self.x, self.y, self.z);
        let (u, v, w) = (axis.x, axis.y, axis.z);

        let r2 = u * u + v * v + w * w;
        let r = r2.sqrt();
        let ct = theta.cos();
        let st = theta.sin() / r;
        let dt = (u * x + v * y + w * z) * (1.0 - ct) / r2;
        Self::new(
            u * dt + x * ct + (-w * y + v * z) * st,
            v * dt + y * ct + (w * x - u * z) * st,
            w * dt + z * ct + (-v * x + u * y) * st,
        )
    }

    /// Angle to `other` in radians, symmetric in both operands.
    #[must_use]
    pub fn angle(&self, other: &Self) -> f64 {
        (self.dot(other) / (self.magnitude() * other.magnitude())).acos()
    }

    /// Projection of `self` onto `other`.
    #[must_use]
    pub fn project(&self, other: &Self) -> Self {
        let n = other.normalized();
        n * self.dot(&n)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, s: f64) -> Vector3 {
        Vector3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v * self
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, s: f64) -> Vector3 {
        Vector3::new(self.x / s, self.y / s, self.z / s)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, s: f64) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }
}

impl DivAssign<f64> for Vector3 {
    fn div_assign(&mut self, s: f64) {
        self.x /= s;
        self.y /= s;
        self.z /= s;
    }
}

/// A 3D position sharing the coordinate representation of [`Vector3`]
/// but tagged as a point rather than a displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Creates a point from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    #[must_use]
    pub const fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Reinterprets a displacement from the origin as a position.
    #[must_use]
    pub const fn from_vector(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// The displacement of this point from the origin.
    #[must_use]
    pub const fn to_vector(self) -> Vector3 {
        Vector3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Vector3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl AddAssign<Vector3> for Point3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign<Vector3> for Point3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl AbsDiffEq for Point3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Point3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-9;

    #[test]
    fn kind_rules() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(1.0, 1.0, 1.0);
        let q: Point3 = p + v;
        assert_eq!(q, Point3::new(2.0, 3.0, 4.0));
        let d: Vector3 = q - p;
        assert_eq!(d, v);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalize_idempotent() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        let n = v.normalized();
        assert!((n.magnitude() - 1.0).abs() < TOL);
        assert_abs_diff_eq!(n.normalized(), n, epsilon = TOL);
    }

    #[test]
    fn normalize_zero_is_noop() {
        let mut v = Vector3::zero();
        v.normalize();
        assert_eq!(v, Vector3::zero());
    }

    #[test]
    fn rotate_around_z_quarter_turn() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let r = v.rotate_around(&Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert_abs_diff_eq!(r, Vector3::new(0.0, 1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn rotate_around_non_unit_axis() {
        // Rodrigues handles a non-unit axis without pre-normalization.
        let v = Vector3::new(1.0, 0.0, 0.0);
        let r = v.rotate_around(&Vector3::new(0.0, 0.0, 5.0), PI);
        assert_abs_diff_eq!(r, Vector3::new(-1.0, 0.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn angle_is_symmetric() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(3.0, 3.0, 0.0);
        assert!((a.angle(&b) - PI / 4.0).abs() < TOL);
        assert!((b.angle(&a) - PI / 4.0).abs() < TOL);
    }

    #[test]
    fn project_onto_axis() {
        let v = Vector3::new(3.0, 4.0, 5.0);
        let p = v.project(&Vector3::new(0.0, 0.0, 2.0));
        assert_abs_diff_eq!(p, Vector3::new(0.0, 0.0, 5.0), epsilon = TOL);
    }

    #[test]
    fn reflect_about_plane_normal() {
        let v = Vector3::new(1.0, -1.0, 0.5);
        let r = v.reflect(&Vector3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(r, Vector3::new(1.0, 1.0, 0.5), epsilon = TOL);
    }
}
