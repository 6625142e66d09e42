use std::ops::{Mul, MulAssign};

use crate::math::Vector3;

use super::Matrix4;

/// A rotation quaternion `w + xi + yj + zk` with `w` the real part.
///
/// Multiplication follows the Hamilton product convention; conversions
/// to and from axis-angle, Euler angles (heading/attitude/bank) and
/// rotation matrices use the euclideanspace.com formulations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::new_identity()
    }
}

impl Quaternion {
    /// Creates a quaternion from its components.
    #[must_use]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation.
    #[must_use]
    pub const fn new_identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// A rotation of `angle` radians about `axis` (normalized internally).
    #[must_use]
    pub fn new_rotate_axis(angle: f64, axis: &Vector3) -> Self {
        let axis = axis.normalized();
        let s = (angle / 2.0).sin();
        Self {
            w: (angle / 2.0).cos(),
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// A rotation from Euler angles (heading about y, attitude about z,
    /// bank about x).
    #[must_use]
    pub fn new_rotate_euler(heading: f64, attitude: f64, bank: f64) -> Self {
        let c1 = (heading / 2.0).cos();
        let s1 = (heading / 2.0).sin();
        let c2 = (attitude / 2.0).cos();
        let s2 = (attitude / 2.0).sin();
        let c3 = (bank / 2.0).cos();
        let s3 = (bank / 2.0).sin();

        Self {
            w: c1 * c2 * c3 - s1 * s2 * s3,
            x: s1 * s2 * c3 + c1 * c2 * s3,
            y: s1 * c2 * c3 + c1 * s2 * s3,
            z: c1 * s2 * c3 - s1 * c2 * s3,
        }
    }

    /// Extracts the rotation from the upper-left 3x3 block of a matrix.
    ///
    /// Branches on the largest diagonal element to keep the square root
    /// well-conditioned.
    #[must_use]
    pub fn new_rotate_matrix(mat: &Matrix4) -> Self {
        let trace = mat.a + mat.f + mat.k;
        if trace > 1e-8 {
            let t = trace + 1.0;
            let s = 0.5 / t.sqrt();
            Self::new(
                s * t,
                (mat.j - mat.g) * s,
                (mat.c - mat.i) * s,
                (mat.e - mat.b) * s,
            )
        } else if mat.a > mat.f && mat.a > mat.k {
            let t = mat.a - mat.f - mat.k + 1.0;
            let s = 0.5 / t.sqrt();
            Self::new(
                (mat.j - mat.g) * s,
                s * t,
                (mat.b + mat.e) * s,
                (mat.i + mat.c) * s,
            )
        } else if mat.f > mat.k {
            let t = -mat.a + mat.f - mat.k + 1.0;
            let s = 0.5 / t.sqrt();
            Self::new(
                (mat.c - mat.i) * s,
                (mat.b + mat.e) * s,
                s * t,
                (mat.g + mat.j) * s,
            )
        } else {
            let t = -mat.a - mat.f + mat.k + 1.0;
            let s = 0.5 / t.sqrt();
            Self::new(
                (mat.e - mat.b) * s,
                (mat.i + mat.c) * s,
                (mat.g + mat.j) * s,
                s * t,
            )
        }
    }

    /// Spherical linear interpolation from `q1` to `q2` at `t` in `[0, 1]`.
    ///
    /// Negates one endpoint when the dot product is negative so the
    /// interpolation takes the shorter arc. Falls back to returning the
    /// endpoint when the angle between the two is near zero and to
    /// linear interpolation when its sine is near zero.
    #[must_use]
    pub fn new_interpolate(q1: &Self, q2: &Self, t: f64) -> Self {
        let mut q1 = *q1;
        let mut cos_theta = q1.w * q2.w + q1.x * q2.x + q1.y * q2.y + q1.z * q2.z;
        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            q1 = Self::new(-q1.w, -q1.x, -q1.y, -q1.z);
        } else if cos_theta > 1.0 {
            cos_theta = 1.0;
        }

        let theta = cos_theta.acos();
        if theta.abs() < 0.01 {
            return *q2;
        }

        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        if sin_theta.abs() < 0.01 {
            return Self::new(
                q1.w * (1.0 - t) + q2.w * t,
                q1.x * (1.0 - t) + q2.x * t,
                q1.y * (1.0 - t) + q2.y * t,
                q1.z * (1.0 - t) + q2.z * t,
            );
        }

        let ratio1 = ((1.0 - t) * theta).sin() / sin_theta;
        let ratio2 = (t * theta).sin() / sin_theta;
        Self::new(
            q1.w * ratio1 + q2.w * ratio2,
            q1.x * ratio1 + q2.x * ratio2,
            q1.y * ratio1 + q2.y * ratio2,
            q1.z * ratio1 + q2.z * ratio2,
        )
    }

    /// Euclidean norm over all four components.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Squared norm.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Resets to the identity in place.
    pub fn identity(&mut self) -> &mut Self {
        *self = Self::new_identity();
        self
    }

    /// Post-multiplies by an axis-angle rotation.
    pub fn rotate_axis(&mut self, angle: f64, axis: &Vector3) -> &mut Self {
        *self *= Self::new_rotate_axis(angle, axis);
        self
    }

    /// Post-multiplies by an Euler-angle rotation.
    pub fn rotate_euler(&mut self, heading: f64, attitude: f64, bank: f64) -> &mut Self {
        *self *= Self::new_rotate_euler(heading, attitude, bank);
        self
    }

    /// Post-multiplies by the rotation extracted from a matrix.
    pub fn rotate_matrix(&mut self, mat: &Matrix4) -> &mut Self {
        *self *= Self::new_rotate_matrix(mat);
        self
    }

    /// The conjugate (inverse rotation for unit quaternions).
    #[must_use]
    pub fn conjugated(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Scales to unit norm in place; a zero quaternion is left unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        let d = self.magnitude();
        if d != 0.0 {
            self.w /= d;
            self.x /= d;
            self.y /= d;
            self.z /= d;
        }
        self
    }

    /// Value-returning twin of [`normalize`](Self::normalize).
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// The rotation as `(angle, axis)`.
    ///
    /// Returns the x axis when the rotation is indistinguishable from
    /// the identity.
    #[must_use]
    pub fn axis_angle(&self) -> (f64, Vector3) {
        let q = if self.w > 1.0 {
            self.normalized()
        } else {
            *self
        };
        let angle = 2.0 * q.w.acos();
        let s = (1.0 - q.w * q.w).sqrt();
        if s < 0.001 {
            (angle, Vector3::new(1.0, 0.0, 0.0))
        } else {
            (angle, Vector3::new(q.x / s, q.y / s, q.z / s))
        }
    }

    /// The rotation as Euler angles `(heading, attitude, bank)`.
    ///
    /// Switches to the gimbal-lock branches when the attitude test
    /// value leaves `[-0.4999, 0.4999]`.
    #[must_use]
    pub fn to_euler(&self) -> (f64, f64, f64) {
        let t = self.x * self.y + self.z * self.w;
        if t > 0.4999 {
            let heading = 2.0 * self.x.atan2(self.w);
            (heading, std::f64::consts::FRAC_PI_2, 0.0)
        } else if t < -0.4999 {
            let heading = -2.0 * self.x.atan2(self.w);
            (heading, -std::f64::consts::FRAC_PI_2, 0.0)
        } else {
            let sqx = self.x * self.x;
            let sqy = self.y * self.y;
            let sqz = self.z * self.z;
            let heading = (2.0 * self.y * self.w - 2.0 * self.x * self.z)
                .atan2(1.0 - 2.0 * sqy - 2.0 * sqz);
            let attitude = (2.0 * t).asin();
            let bank = (2.0 * self.x * self.w - 2.0 * self.y * self.z)
                .atan2(1.0 - 2.0 * sqx - 2.0 * sqz);
            (heading, attitude, bank)
        }
    }

    /// The rotation embedded in the upper-left 3x3 block of a [`Matrix4`].
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        let xx = self.x * self.x;
        let xy = self.x * self.y;
        let xz = self.x * self.z;
        let xw = self.x * self.w;
        let yy = self.y * self.y;
        let yz = self.y * self.z;
        let yw = self.y * self.w;
        let zz = self.z * self.z;
        let zw = self.z * self.w;

        let mut m = Matrix4::new_identity();
        m.a = 1.0 - 2.0 * (yy + zz);
        m.b = 2.0 * (xy - zw);
        m.c = 2.0 * (xz + yw);
        m.e = 2.0 * (xy + zw);
        m.f = 1.0 - 2.0 * (xx + zz);
        m.g = 2.0 * (yz - xw);
        m.i = 2.0 * (xz - yw);
        m.j = 2.0 * (yz + xw);
        m.k = 1.0 - 2.0 * (xx + yy);
        m
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, o: Quaternion) -> Quaternion {
        Quaternion::new(
            -self.x * o.x - self.y * o.y - self.z * o.z + self.w * o.w,
            self.x * o.w + self.y * o.z - self.z * o.y + self.w * o.x,
            -self.x * o.z + self.y * o.w + self.z * o.x + self.w * o.y,
            self.x * o.y - self.y * o.x + self.z * o.w + self.w * o.z,
        )
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, o: Quaternion) {
        *self = *self * o;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;

    /// Rotates a vector via the expanded sandwich product `q v q*`.
    #[allow(clippy::suspicious_arithmetic_impl, clippy::similar_names)]
    fn mul(self, v: Vector3) -> Vector3 {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        let ww = w * w;
        let w2 = w * 2.0;
        let wx2 = w2 * x;
        let wy2 = w2 * y;
        let wz2 = w2 * z;
        let xx = x * x;
        let x2 = x * 2.0;
        let xy2 = x2 * y;
        let xz2 = x2 * z;
        let yy = y * y;
        let yz2 = 2.0 * y * z;
        let zz = z * z;
        Vector3::new(
            ww * v.x + wy2 * v.z - wz2 * v.y + xx * v.x + xy2 * v.y + xz2 * v.z
                - zz * v.x
                - yy * v.x,
            xy2 * v.x + yy * v.y + yz2 * v.z + wz2 * v.x - zz * v.y + ww * v.y
                - wx2 * v.z
                - xx * v.y,
            xz2 * v.x + yz2 * v.y + zz * v.z - wy2 * v.x - yy * v.z + wx2 * v.y - xx * v.z
                + ww * v.z,
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

    fn axes() -> Vec<Vector3> {
        let d = 1.0 / 3.0_f64.sqrt();
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(d, d, d),
        ]
    }

    #[test]
    fn rotates_vector_about_z() {
        let q = Quaternion::new_rotate_axis(FRAC_PI_2, &Vector3::new(0.0, 0.0, 1.0));
        let v = q * Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = TOL);
    }

    #[test]
    fn hamilton_product_composes_rotations() {
        let qx = Quaternion::new_rotate_axis(FRAC_PI_2, &Vector3::new(1.0, 0.0, 0.0));
        let qz = Quaternion::new_rotate_axis(FRAC_PI_2, &Vector3::new(0.0, 0.0, 1.0));
        let v = (qz * qx) * Vector3::new(0.0, 1.0, 0.0);
        // x-rotation sends y to z; z-rotation leaves z alone.
        assert_abs_diff_eq!(v, Vector3::new(0.0, 0.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn matrix_and_quaternion_rotate_identically() {
        let angles = [0.0, PI / 4.0, FRAC_PI_2, PI, 3.0 * PI / 2.0];
        let v = Vector3::new(0.3, -1.2, 2.5);
        for axis in axes() {
            for &angle in &angles {
                let q = Quaternion::new_rotate_axis(angle, &axis);
                let by_q = q * v;
                let by_m = q.matrix() * v;
                assert_abs_diff_eq!(by_q, by_m, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn matrix_round_trip_picks_stable_branch() {
        // One angle per extraction branch: small (trace dominant) and
        // near-pi rotations about each axis (diagonal dominant).
        for axis in axes() {
            for angle in [0.1, PI - 0.1] {
                let q = Quaternion::new_rotate_axis(angle, &axis);
                let r = Quaternion::new_rotate_matrix(&q.matrix());
                // q and -q encode the same rotation.
                let dot = q.w * r.w + q.x * r.x + q.y * r.y + q.z * r.z;
                assert!(dot.abs() > 1.0 - 1e-9, "axis={axis:?} angle={angle}");
            }
        }
    }

    #[test]
    fn axis_angle_round_trip() {
        let axis = Vector3::new(0.0, 1.0, 0.0);
        let q = Quaternion::new_rotate_axis(1.2, &axis);
        let (angle, a) = q.axis_angle();
        assert!((angle - 1.2).abs() < TOL);
        assert_abs_diff_eq!(a, axis, epsilon = 1e-9);
    }

    #[test]
    fn axis_angle_identity_defaults_to_x() {
        let (angle, axis) = Quaternion::new_identity().axis_angle();
        assert!(angle.abs() < TOL);
        assert_eq!(axis, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn euler_round_trip() {
        let q = Quaternion::new_rotate_euler(0.4, 0.2, -0.3);
        let (h, a, b) = q.to_euler();
        assert!((h - 0.4).abs() < 1e-9);
        assert!((a - 0.2).abs() < 1e-9);
        assert!((b + 0.3).abs() < 1e-9);
    }

    #[test]
    fn euler_gimbal_lock_branch() {
        // Attitude of pi/2 drives the test value t to 0.5.
        let q = Quaternion::new_rotate_euler(0.7, FRAC_PI_2, 0.0);
        let (h, a, b) = q.to_euler();
        assert!((a - FRAC_PI_2).abs() < 1e-9);
        assert!(b.abs() < TOL);
        assert!((h - 0.7).abs() < 1e-9);
    }

    #[test]
    fn conjugate_reverses_rotation() {
        let q = Quaternion::new_rotate_axis(0.9, &Vector3::new(0.0, 1.0, 0.0));
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(q.conjugated() * (q * v), v, epsilon = 1e-9);
    }

    // ── slerp ──

    #[test]
    fn interpolate_midpoint() {
        let q1 = Quaternion::new_identity();
        let q2 = Quaternion::new_rotate_axis(FRAC_PI_2, &Vector3::new(0.0, 0.0, 1.0));
        let q = Quaternion::new_interpolate(&q1, &q2, 0.5);
        let expected = Quaternion::new_rotate_axis(PI / 4.0, &Vector3::new(0.0, 0.0, 1.0));
        assert!((q.w - expected.w).abs() < 1e-9);
        assert!((q.z - expected.z).abs() < 1e-9);
    }

    #[test]
    fn interpolate_takes_shortest_path() {
        let q1 = Quaternion::new_rotate_axis(0.2, &Vector3::new(0.0, 0.0, 1.0));
        let q2 = Quaternion::new_rotate_axis(0.8, &Vector3::new(0.0, 0.0, 1.0));
        // Negate q2: same rotation, opposite sign. The dot product goes
        // negative and the negation policy must kick in.
        let neg_q2 = Quaternion::new(-q2.w, -q2.x, -q2.y, -q2.z);
        let q = Quaternion::new_interpolate(&q1, &neg_q2, 0.5);
        let v = q * Vector3::new(1.0, 0.0, 0.0);
        let expected = Quaternion::new_rotate_axis(0.5, &Vector3::new(0.0, 0.0, 1.0))
            * Vector3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(v, expected, epsilon = 1e-9);
    }

    #[test]
    fn interpolate_near_zero_angle_returns_endpoint() {
        let q1 = Quaternion::new_rotate_axis(0.001, &Vector3::new(0.0, 0.0, 1.0));
        let q2 = Quaternion::new_rotate_axis(0.002, &Vector3::new(0.0, 0.0, 1.0));
        let q = Quaternion::new_interpolate(&q1, &q2, 0.25);
        assert_eq!(q, q2);
    }
}
