use crate::error::{EuklidError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::transform::Matrix4;

/// A plane in Hesse normal form: all points `p` with `n . p = k`,
/// where `n` is stored as a unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    n: Vector3,
    k: f64,
}

impl Plane {
    /// Creates the plane through three points.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] if the points are
    /// collinear (or coincident), which leaves the normal undefined.
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        let n = (b - a).cross(&(c - a));
        if n.magnitude_squared() < TOLERANCE * TOLERANCE {
            return Err(EuklidError::InvalidGeometry(
                "points on plane are collinear".into(),
            ));
        }
        let n = n.normalized();
        Ok(Self { n, k: n.dot(&a.to_vector()) })
    }

    /// Creates the plane through `p` with normal `n` (normalized
    /// internally).
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] for a zero normal.
    pub fn from_point_normal(p: Point3, n: Vector3) -> Result<Self> {
        if n.magnitude_squared() < TOLERANCE * TOLERANCE {
            return Err(EuklidError::InvalidGeometry(
                "plane has zero-length normal vector".into(),
            ));
        }
        let n = n.normalized();
        Ok(Self { n, k: n.dot(&p.to_vector()) })
    }

    /// Creates a plane from a normal and offset. The normal is
    /// normalized; the offset is kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] for a zero normal.
    pub fn new(n: Vector3, k: f64) -> Result<Self> {
        if n.magnitude_squared() < TOLERANCE * TOLERANCE {
            return Err(EuklidError::InvalidGeometry(
                "plane has zero-length normal vector".into(),
            ));
        }
        Ok(Self {
            n: n.normalized(),
            k,
        })
    }

    /// The unit normal.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.n
    }

    /// The offset `k` in `n . p = k`.
    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// An arbitrary point on the plane, picked along the dominant-free
    /// coordinate axis.
    pub(crate) fn reference_point(&self) -> Point3 {
        if self.n.z != 0.0 {
            Point3::new(0.0, 0.0, self.k / self.n.z)
        } else if self.n.y != 0.0 {
            Point3::new(0.0, self.k / self.n.y, 0.0)
        } else {
            Point3::new(self.k / self.n.x, 0.0, 0.0)
        }
    }

    /// The plane mapped through a transform: the normal is mapped
    /// linearly and the offset re-derived from a mapped point of the
    /// plane.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] if the transform
    /// collapses the normal to zero.
    pub fn transformed(&self, m: &Matrix4) -> Result<Self> {
        let p = *m * self.reference_point();
        let n = *m * self.n;
        if n.magnitude_squared() < TOLERANCE * TOLERANCE {
            return Err(EuklidError::InvalidGeometry(
                "transform collapses the plane normal".into(),
            ));
        }
        let n = n.normalized();
        Ok(Self { n, k: n.dot(&p.to_vector()) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn from_points_derives_unit_normal() {
        let pl = Plane::from_points(p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(0.0, 1.0, 1.0)).unwrap();
        assert_abs_diff_eq!(pl.normal(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert!((pl.k() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn collinear_points_are_rejected() {
        let err =
            Plane::from_points(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0), p(2.0, 2.0, 2.0)).unwrap_err();
        assert!(matches!(err, EuklidError::InvalidGeometry(_)));
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(Plane::new(Vector3::zero(), 1.0).is_err());
        assert!(Plane::from_point_normal(Point3::origin(), Vector3::zero()).is_err());
    }

    #[test]
    fn non_unit_normal_is_normalized() {
        let pl = Plane::from_point_normal(p(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 5.0)).unwrap();
        assert!((pl.normal().magnitude() - 1.0).abs() < 1e-12);
        assert!((pl.k() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn reference_point_satisfies_plane_equation() {
        let pl = Plane::new(Vector3::new(1.0, 2.0, 3.0), 4.0).unwrap();
        let q = pl.reference_point();
        assert!((pl.normal().dot(&q.to_vector()) - pl.k()).abs() < 1e-12);
    }

    #[test]
    fn translation_shifts_offset() {
        let pl = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0).unwrap();
        let t = pl.transformed(&Matrix4::new_translate(0.0, 0.0, 3.0)).unwrap();
        assert_abs_diff_eq!(t.normal(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert!((t.k() - 4.0).abs() < 1e-12);
    }
}
