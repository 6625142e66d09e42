use std::ops::{Mul, MulAssign};

use crate::error::{EuklidError, Result};
use crate::math::{Point3, Vector3};

use super::SINGULAR_EPS;

/// A row-major 4x4 matrix representing a projective 3D transform.
///
/// Cell layout:
///
/// ```text
/// a b c d
/// e f g h
/// i j k l
/// m n o p
/// ```
///
/// Multiplying by a [`Point3`] applies the affine part (no homogeneous
/// divide); [`transform`](Self::transform) divides by `w` when it is
/// non-zero. Multiplying by a [`Vector3`] applies the linear part only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::struct_field_names)]
pub struct Matrix4 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
    pub l: f64,
    pub m: f64,
    pub n: f64,
    pub o: f64,
    pub p: f64,
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::new_identity()
    }
}

impl Matrix4 {
    /// The identity transform.
    #[must_use]
    pub const fn new_identity() -> Self {
        Self::from_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a matrix from 16 values in row-major order.
    #[must_use]
    pub const fn from_array(v: [f64; 16]) -> Self {
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
            g: v[6],
            h: v[7],
            i: v[8],
            j: v[9],
            k: v[10],
            l: v[11],
            m: v[12],
            n: v[13],
            o: v[14],
            p: v[15],
        }
    }

    /// The cells as 16 consecutive values in row-major order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 16] {
        [
            self.a, self.b, self.c, self.d, //
            self.e, self.f, self.g, self.h, //
            self.i, self.j, self.k, self.l, //
            self.m, self.n, self.o, self.p,
        ]
    }

    /// A non-uniform scale about the origin.
    #[must_use]
    pub fn new_scale(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::new_identity();
        m.a = x;
        m.f = y;
        m.k = z;
        m
    }

    /// A translation by `(x, y, z)`.
    #[must_use]
    pub fn new_translate(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::new_identity();
        m.d = x;
        m.h = y;
        m.l = z;
        m
    }

    /// A rotation about the x axis by `angle` radians.
    #[must_use]
    pub fn new_rotate_x(angle: f64) -> Self {
        let mut m = Self::new_identity();
        let s = angle.sin();
        let c = angle.cos();
        m.f = c;
        m.k = c;
        m.g = -s;
        m.j = s;
        m
    }

    /// A rotation about the y axis by `angle` radians.
    #[must_use]
    pub fn new_rotate_y(angle: f64) -> Self {
        let mut m = Self::new_identity();
        let s = angle.sin();
        let c = angle.cos();
        m.a = c;
        m.k = c;
        m.c = s;
        m.i = -s;
        m
    }

    /// A rotation about the z axis by `angle` radians.
    #[must_use]
    pub fn new_rotate_z(angle: f64) -> Self {
        let mut m = Self::new_identity();
        let s = angle.sin();
        let c = angle.cos();
        m.a = c;
        m.f = c;
        m.b = -s;
        m.e = s;
        m
    }

    /// A rotation about an arbitrary axis (normalized internally).
    #[must_use]
    pub fn new_rotate_axis(angle: f64, axis: &Vector3) -> Self {
        let v = axis.normalized();
        let (x, y, z) = (v.x, v.y, v.z);

        let mut m = Self::new_identity();
        let s = angle.sin();
        let c = angle.cos();
        let c1 = 1.0 - c;

        m.a = x * x * c1 + c;
        m.b = x * y * c1 - z * s;
        m.c = x * z * c1 + y * s;
        m.e = y * x * c1 + z * s;
        m.f = y * y * c1 + c;
        m.g = y * z * c1 - x * s;
        m.i = x * z * c1 - y * s;
        m.j = y * z * c1 + x * s;
        m.k = z * z * c1 + c;
        m
    }

    /// A rotation from Euler angles (heading about y, attitude about z,
    /// bank about x).
    #[must_use]
    pub fn new_rotate_euler(heading: f64, attitude: f64, bank: f64) -> Self {
        let ch = heading.cos();
        let sh = heading.sin();
        let ca = attitude.cos();
        let sa = attitude.sin();
        let cb = bank.cos();
        let sb = bank.sin();

        let mut m = Self::new_identity();
        m.a = ch * ca;
        m.b = sh * sb - ch * sa * cb;
        m.c = ch * sa * sb + sh * cb;
        m.e = sa;
        m.f = ca * cb;
        m.g = -ca * sb;
        m.i = -sh * ca;
        m.j = sh * sa * cb + ch * sb;
        m.k = -sh * sa * sb + ch * cb;
        m
    }

    /// A rotation whose columns are the three given basis vectors.
    #[must_use]
    pub fn new_rotate_triple_axis(x: &Vector3, y: &Vector3, z: &Vector3) -> Self {
        let mut m = Self::new_identity();
        m.a = x.x;
        m.b = y.x;
        m.c = z.x;
        m.e = x.y;
        m.f = y.y;
        m.g = z.y;
        m.i = x.z;
        m.j = y.z;
        m.k = z.z;
        m
    }

    /// A camera-style transform looking from `eye` towards `at`.
    #[must_use]
    pub fn new_look_at(eye: Point3, at: Point3, up: &Vector3) -> Self {
        let z = (eye - at).normalized();
        let x = up.cross(&z).normalized();
        let y = z.cross(&x);

        let mut m = Self::new_rotate_triple_axis(&x, &y, &z);
        m.d = eye.x;
        m.h = eye.y;
        m.l = eye.z;
        m
    }

    /// A perspective projection.
    ///
    /// # Errors
    ///
    /// Returns a domain error when `near` is zero or equals `far`.
    pub fn new_perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Result<Self> {
        if near == 0.0 {
            return Err(EuklidError::Domain {
                parameter: "near",
                value: near,
                reason: "near plane must be non-zero",
            });
        }
        if near == far {
            return Err(EuklidError::Domain {
                parameter: "far",
                value: far,
                reason: "near and far planes must differ",
            });
        }

        let f = 1.0 / (fov_y / 2.0).tan();
        let mut m = Self::new_identity();
        m.a = f / aspect;
        m.f = f;
        m.k = (far + near) / (near - far);
        m.l = 2.0 * far * near / (near - far);
        m.o = -1.0;
        m.p = 0.0;
        Ok(m)
    }

    /// Resets to the identity in place.
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::new_identity();
        self
    }

    /// Post-multiplies by a scale.
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        *self *= Self::new_scale(x, y, z);
        self
    }

    /// Post-multiplies by a translation.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        *self *= Self::new_translate(x, y, z);
        self
    }

    /// Post-multiplies by a rotation about the x axis.
    pub fn rotate_x(&mut self, angle: f64) -> &mut Self {
        *self *= Self::new_rotate_x(angle);
        self
    }

    /// Post-multiplies by a rotation about the y axis.
    pub fn rotate_y(&mut self, angle: f64) -> &mut Self {
        *self *= Self::new_rotate_y(angle);
        self
    }

    /// Post-multiplies by a rotation about the z axis.
    pub fn rotate_z(&mut self, angle: f64) -> &mut Self {
        *self *= Self::new_rotate_z(angle);
        self
    }

    /// Post-multiplies by a rotation about an arbitrary axis.
    pub fn rotate_axis(&mut self, angle: f64, axis: &Vector3) -> &mut Self {
        *self *= Self::new_rotate_axis(angle, axis);
        self
    }

    /// Post-multiplies by an Euler-angle rotation.
    pub fn rotate_euler(&mut self, heading: f64, attitude: f64, bank: f64) -> &mut Self {
        *self *= Self::new_rotate_euler(heading, attitude, bank);
        self
    }

    /// Applies the projective transform to a point, dividing by the
    /// homogeneous coordinate `w` when it is non-zero.
    #[must_use]
    pub fn transform(&self, b: Point3) -> Point3 {
        let mut p = Point3::new(
            self.a * b.x + self.b * b.y + self.c * b.z + self.d,
            self.e * b.x + self.f * b.y + self.g * b.z + self.h,
            self.i * b.x + self.j * b.y + self.k * b.z + self.l,
        );
        let w = self.m * b.x + self.n * b.y + self.o * b.z + self.p;
        if w != 0.0 {
            p.x /= w;
            p.y /= w;
            p.z /= w;
        }
        p
    }

    /// Transposes in place.
    pub fn transpose(&mut self) -> &mut Self {
        *self = Self::from_array([
            self.a, self.e, self.i, self.m, //
            self.b, self.f, self.j, self.n, //
            self.c, self.g, self.k, self.o, //
            self.d, self.h, self.l, self.p,
        ]);
        self
    }

    /// Value-returning twin of [`transpose`](Self::transpose).
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Determinant, by 2x2 cofactor expansion.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        (self.a * self.f - self.e * self.b) * (self.k * self.p - self.o * self.l)
            - (self.a * self.j - self.i * self.b) * (self.g * self.p - self.o * self.h)
            + (self.a * self.n - self.m * self.b) * (self.g * self.l - self.k * self.h)
            + (self.e * self.j - self.i * self.f) * (self.c * self.p - self.o * self.d)
            - (self.e * self.n - self.m * self.f) * (self.c * self.l - self.k * self.d)
            + (self.i * self.n - self.m * self.j) * (self.c * self.h - self.g * self.d)
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
        let mut t = Self::new_identity();

        t.a = d * (self.f * (self.k * self.p - self.o * self.l)
            + self.j * (self.o * self.h - self.g * self.p)
            + self.n * (self.g * self.l - self.k * self.h));
        t.e = d * (self.g * (self.i * self.p - self.m * self.l)
            + self.k * (self.m * self.h - self.e * self.p)
            + self.o * (self.e * self.l - self.i * self.h));
        t.i = d * (self.h * (self.i * self.n - self.m * self.j)
            + self.l * (self.m * self.f - self.e * self.n)
            + self.p * (self.e * self.j - self.i * self.f));
        t.m = d * (self.e * (self.n * self.k - self.j * self.o)
            + self.i * (self.f * self.o - self.n * self.g)
            + self.m * (self.j * self.g - self.f * self.k));

        t.b = d * (self.j * (self.c * self.p - self.o * self.d)
            + self.n * (self.k * self.d - self.c * self.l)
            + self.b * (self.o * self.l - self.k * self.p));
        t.f = d * (self.k * (self.a * self.p - self.m * self.d)
            + self.o * (self.i * self.d - self.a * self.l)
            + self.c * (self.m * self.l - self.i * self.p));
        t.j = d * (self.l * (self.a * self.n - self.m * self.b)
            + self.p * (self.i * self.b - self.a * self.j)
            + self.d * (self.m * self.j - self.i * self.n));
        t.n = d * (self.i * (self.n * self.c - self.b * self.o)
            + self.m * (self.b * self.k - self.j * self.c)
            + self.a * (self.j * self.o - self.n * self.k));

        t.c = d * (self.n * (self.c * self.h - self.g * self.d)
            + self.b * (self.g * self.p - self.o * self.h)
            + self.f * (self.o * self.d - self.c * self.p));
        t.g = d * (self.o * (self.a * self.h - self.e * self.d)
            + self.c * (self.e * self.p - self.m * self.h)
            + self.g * (self.m * self.d - self.a * self.p));
        t.k = d * (self.p * (self.a * self.f - self.e * self.b)
            + self.d * (self.e * self.n - self.m * self.f)
            + self.h * (self.m * self.b - self.a * self.n));
        t.o = d * (self.m * (self.f * self.c - self.b * self.g)
            + self.a * (self.n * self.g - self.f * self.o)
            + self.e * (self.b * self.o - self.n * self.c));

        t.d = d * (self.b * (self.k * self.h - self.g * self.l)
            + self.f * (self.c * self.l - self.k * self.d)
            + self.j * (self.g * self.d - self.c * self.h));
        t.h = d * (self.c * (self.i * self.h - self.e * self.l)
            + self.g * (self.a * self.l - self.i * self.d)
            + self.k * (self.e * self.d - self.a * self.h));
        t.l = d * (self.d * (self.i * self.f - self.e * self.j)
            + self.h * (self.a * self.j - self.i * self.b)
            + self.l * (self.e * self.b - self.a * self.f));
        t.p = d * (self.a * (self.f * self.k - self.j * self.g)
            + self.e * (self.j * self.c - self.b * self.k)
            + self.i * (self.b * self.g - self.f * self.c));

        t
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, o: Matrix4) -> Matrix4 {
        Matrix4::from_array([
            self.a * o.a + self.b * o.e + self.c * o.i + self.d * o.m,
            self.a * o.b + self.b * o.f + self.c * o.j + self.d * o.n,
            self.a * o.c + self.b * o.g + self.c * o.k + self.d * o.o,
            self.a * o.d + self.b * o.h + self.c * o.l + self.d * o.p,
            self.e * o.a + self.f * o.e + self.g * o.i + self.h * o.m,
            self.e * o.b + self.f * o.f + self.g * o.j + self.h * o.n,
            self.e * o.c + self.f * o.g + self.g * o.k + self.h * o.o,
            self.e * o.d + self.f * o.h + self.g * o.l + self.h * o.p,
            self.i * o.a + self.j * o.e + self.k * o.i + self.l * o.m,
            self.i * o.b + self.j * o.f + self.k * o.j + self.l * o.n,
            self.i * o.c + self.j * o.g + self.k * o.k + self.l * o.o,
            self.i * o.d + self.j * o.h + self.k * o.l + self.l * o.p,
            self.m * o.a + self.n * o.e + self.o * o.i + self.p * o.m,
            self.m * o.b + self.n * o.f + self.o * o.j + self.p * o.n,
            self.m * o.c + self.n * o.g + self.o * o.k + self.p * o.o,
            self.m * o.d + self.n * o.h + self.o * o.l + self.p * o.p,
        ])
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, o: Matrix4) {
        *self = *self * o;
    }
}

impl Mul<Point3> for Matrix4 {
    type Output = Point3;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, b: Point3) -> Point3 {
        Point3::new(
            self.a * b.x + self.b * b.y + self.c * b.z + self.d,
            self.e * b.x + self.f * b.y + self.g * b.z + self.h,
            self.i * b.x + self.j * b.y + self.k * b.z + self.l,
        )
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, b: Vector3) -> Vector3 {
        Vector3::new(
            self.a * b.x + self.b * b.y + self.c * b.z,
            self.e * b.x + self.f * b.y + self.g * b.z,
            self.i * b.x + self.j * b.y + self.k * b.z,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const TOL: f64 = 1e-9;

    fn assert_matrix_eq(a: &Matrix4, b: &Matrix4, tol: f64) {
        for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
            assert!((x - y).abs() < tol, "{x} != {y}");
        }
    }

    #[test]
    fn translate_affects_points_only() {
        let m = Matrix4::new_translate(1.0, 2.0, 3.0);
        assert_eq!(m * Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let m = Matrix4::new_rotate_z(FRAC_PI_2);
        let p = m * Point3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn rotate_axis_matches_principal_axis() {
        let a = Matrix4::new_rotate_axis(0.8, &Vector3::new(0.0, 0.0, 2.0));
        let b = Matrix4::new_rotate_z(0.8);
        assert_matrix_eq(&a, &b, TOL);
    }

    #[test]
    fn inverse_round_trip() {
        let m = Matrix4::new_translate(1.0, -2.0, 0.5)
            * Matrix4::new_rotate_y(0.4)
            * Matrix4::new_scale(2.0, 3.0, 0.5);
        assert!(m.determinant().abs() >= 0.01);
        assert_matrix_eq(&(m * m.inverse()), &Matrix4::new_identity(), TOL);
    }

    #[test]
    fn near_singular_inverse_is_identity() {
        let m = Matrix4::new_scale(0.01, 0.01, 0.01);
        assert!(m.determinant().abs() < 1e-3);
        assert_eq!(m.inverse(), Matrix4::new_identity());
    }

    #[test]
    fn transform_divides_by_w() {
        let mut m = Matrix4::new_identity();
        m.p = 2.0;
        let p = m.transform(Point3::new(4.0, 6.0, 8.0));
        assert_abs_diff_eq!(p, Point3::new(2.0, 3.0, 4.0), epsilon = TOL);
    }

    #[test]
    fn perspective_maps_near_plane() {
        let m = Matrix4::new_perspective(FRAC_PI_2, 1.0, 1.0, 10.0).unwrap();
        let p = m.transform(Point3::new(0.0, 0.0, -1.0));
        assert!((p.z + 1.0).abs() < TOL, "z={}", p.z);
    }

    #[test]
    fn perspective_rejects_degenerate_planes() {
        assert!(Matrix4::new_perspective(FRAC_PI_2, 1.0, 0.0, 10.0).is_err());
        assert!(Matrix4::new_perspective(FRAC_PI_2, 1.0, 2.0, 2.0).is_err());
    }

    #[test]
    fn transpose_round_trip() {
        let m = Matrix4::new_rotate_euler(0.2, 0.3, 0.4);
        assert_eq!(m.transposed().transposed(), m);
    }

    #[test]
    fn look_at_places_eye() {
        let eye = Point3::new(0.0, 0.0, 5.0);
        let m = Matrix4::new_look_at(eye, Point3::origin(), &Vector3::new(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(m * Point3::origin(), eye, epsilon = TOL);
    }

    #[test]
    fn euler_full_turn_is_identity() {
        let m = Matrix4::new_rotate_euler(2.0 * PI, 0.0, 0.0);
        assert_matrix_eq(&m, &Matrix4::new_identity(), TOL);
    }
}
