use std::ops::{Mul, MulAssign};

use crate::math::{Point2, Vector2};

use super::SINGULAR_EPS;

/// A row-major 3x3 matrix representing an affine 2D transform.
///
/// Cell layout:
///
/// ```text
/// a b c
/// e f g
/// i j k
/// ```
///
/// Multiplying by a [`Point2`] applies the full affine transform;
/// multiplying by a [`Vector2`] applies the linear part only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::struct_field_names)]
pub struct Matrix3 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::new_identity()
    }
}

impl Matrix3 {
    /// The identity transform.
    #[must_use]
    pub const fn new_identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            e: 0.0,
            f: 1.0,
            g: 0.0,
            i: 0.0,
            j: 0.0,
            k: 1.0,
        }
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub fn new_scale(x: f64, y: f64) -> Self {
        let mut m = Self::new_identity();
        m.a = x;
        m.f = y;
        m
    }

    /// A translation by `(x, y)`.
    #[must_use]
    pub fn new_translate(x: f64, y: f64) -> Self {
        let mut m = Self::new_identity();
        m.c = x;
        m.g = y;
        m
    }

    /// A counter-clockwise rotation about the origin by `angle` radians.
    #[must_use]
    pub fn new_rotate(angle: f64) -> Self {
        let mut m = Self::new_identity();
        let s = angle.sin();
        let c = angle.cos();
        m.a = c;
        m.f = c;
        m.b = -s;
        m.e = s;
        m
    }

    /// Builds a matrix from 9 values in row-major order.
    #[must_use]
    pub const fn from_array(m: [f64; 9]) -> Self {
        Self {
            a: m[0],
            b: m[1],
            c: m[2],
            e: m[3],
            f: m[4],
            g: m[5],
            i: m[6],
            j: m[7],
            k: m[8],
        }
    }

    /// The cells as 9 consecutive values in row-major order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 9] {
        [
            self.a, self.b, self.c, self.e, self.f, self.g, self.i, self.j, self.k,
        ]
    }

    /// Resets to the identity in place.
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::new_identity();
        self
    }

    /// Post-multiplies by a scale.
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        *self *= Self::new_scale(x, y);
        self
    }

    /// Post-multiplies by a translation.
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        *self *= Self::new_translate(x, y);
        self
    }

    /// Post-multiplies by a rotation.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        *self *= Self::new_rotate(angle);
        self
    }

    /// Determinant, by cofactor expansion.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.f * self.k + self.b * self.g * self.i + self.c * self.e * self.j
            - self.a * self.g * self.j
            - self.b * self.e * self.k
            - self.c * self.f * self.i
    }

    /// Closed-form inverse.
    ///
    /// Returns the identity when `|det| < SINGULAR_EPS` rather than
    /// failing; check [`determinant`](Self::determinant) to detect
    /// singularity.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPS {
            return Self::new_identity();
        }
        let d = 1.0 / det;

        let mut m = Self::new_identity();
        m.a = d * (self.f * self.k - self.g * self.j);
        m.b = d * (self.c * self.j - self.b * self.k);
        m.c = d * (self.b * self.g - self.c * self.f);
        m.e = d * (self.g * self.i - self.e * self.k);
        m.f = d * (self.a * self.k - self.c * self.i);
        m.g = d * (self.c * self.e - self.a * self.g);
        m.i = d * (self.e * self.j - self.f * self.i);
        m.j = d * (self.b * self.i - self.a * self.j);
        m.k = d * (self.a * self.f - self.b * self.e);
        m
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, o: Matrix3) -> Matrix3 {
        let mut m = Matrix3::new_identity();
        m.a = self.a * o.a + self.b * o.e + self.c * o.i;
        m.b = self.a * o.b + self.b * o.f + self.c * o.j;
        m.c = self.a * o.c + self.b * o.g + self.c * o.k;
        m.e = self.e * o.a + self.f * o.e + self.g * o.i;
        m.f = self.e * o.b + self.f * o.f + self.g * o.j;
        m.g = self.e * o.c + self.f * o.g + self.g * o.k;
        m.i = self.i * o.a + self.j * o.e + self.k * o.i;
        m.j = self.i * o.b + self.j * o.f + self.k * o.j;
        m.k = self.i * o.c + self.j * o.g + self.k * o.k;
        m
    }
}

impl MulAssign for Matrix3 {
    fn mul_assign(&mut self, o: Matrix3) {
        *self = *self * o;
    }
}

impl Mul<Point2> for Matrix3 {
    type Output = Point2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, p: Point2) -> Point2 {
        Point2::new(
            self.a * p.x + self.b * p.y + self.c,
            self.e * p.x + self.f * p.y + self.g,
        )
    }
}

impl Mul<Vector2> for Matrix3 {
    type Output = Vector2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, v: Vector2) -> Vector2 {
        Vector2::new(self.a * v.x + self.b * v.y, self.e * v.x + self.f * v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-9;

    #[test]
    fn default_is_identity() {
        let m = Matrix3::default();
        let p = Point2::new(3.0, -2.0);
        assert_eq!(m * p, p);
    }

    #[test]
    fn translate_moves_points_not_vectors() {
        let m = Matrix3::new_translate(5.0, 7.0);
        assert_eq!(m * Point2::new(1.0, 1.0), Point2::new(6.0, 8.0));
        assert_eq!(m * Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let m = Matrix3::new_rotate(FRAC_PI_2);
        let p = m * Point2::new(1.0, 0.0);
        assert_abs_diff_eq!(p, Point2::new(0.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn composition_applies_right_to_left() {
        let m = Matrix3::new_translate(1.0, 0.0) * Matrix3::new_scale(2.0, 2.0);
        // Scale first, then translate.
        assert_abs_diff_eq!(m * Point2::new(1.0, 1.0), Point2::new(3.0, 2.0), epsilon = TOL);
    }

    #[test]
    fn mutating_compose_matches_value_compose() {
        let mut m = Matrix3::new_identity();
        m.translate(1.0, 0.0).scale(2.0, 2.0);
        let n = Matrix3::new_translate(1.0, 0.0) * Matrix3::new_scale(2.0, 2.0);
        assert_eq!(m, n);
    }

    #[test]
    fn inverse_round_trip() {
        let m = Matrix3::new_translate(3.0, -1.0) * Matrix3::new_rotate(0.7);
        let r = m * m.inverse();
        let id = Matrix3::new_identity();
        for (x, y) in r.to_array().iter().zip(id.to_array().iter()) {
            assert!((x - y).abs() < TOL, "{x} != {y}");
        }
    }

    #[test]
    fn near_singular_inverse_is_identity() {
        let m = Matrix3::new_scale(1e-4, 1e-4);
        assert_eq!(m.inverse(), Matrix3::new_identity());
    }

    #[test]
    fn array_round_trip() {
        let m = Matrix3::new_rotate(0.3) * Matrix3::new_translate(1.0, 2.0);
        assert_eq!(Matrix3::from_array(m.to_array()), m);
    }
}
