use crate::error::{EuklidError, Result};
use crate::math::Point2;
use crate::transform::Matrix3;

/// A circle in the plane, center plus non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    c: Point2,
    r: f64,
}

impl Circle {
    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::Domain`] if the radius is negative or not
    /// finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(EuklidError::Domain {
                parameter: "radius",
                value: radius,
                reason: "must be finite and non-negative",
            });
        }
        Ok(Self {
            c: center,
            r: radius,
        })
    }

    /// The center.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.c
    }

    /// The radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.r
    }

    /// The circle with its center mapped through a transform. The
    /// radius is unchanged, so the result is exact only for rigid
    /// transforms.
    #[must_use]
    pub fn transformed(&self, m: &Matrix3) -> Self {
        Self {
            c: *m * self.c,
            r: self.r,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_radius() {
        let err = Circle::new(Point2::origin(), -1.0).unwrap_err();
        assert!(matches!(err, EuklidError::Domain { parameter: "radius", .. }));
    }

    #[test]
    fn rejects_non_finite_radius() {
        assert!(Circle::new(Point2::origin(), f64::INFINITY).is_err());
        assert!(Circle::new(Point2::origin(), f64::NAN).is_err());
    }

    #[test]
    fn zero_radius_is_allowed() {
        let c = Circle::new(Point2::new(2.0, 3.0), 0.0).unwrap();
        assert_eq!(c.radius(), 0.0);
    }

    #[test]
    fn transform_moves_center_only() {
        let c = Circle::new(Point2::origin(), 2.0).unwrap();
        let t = c.transformed(&Matrix3::new_translate(1.0, -1.0));
        assert_eq!(t.center(), Point2::new(1.0, -1.0));
        assert_eq!(t.radius(), 2.0);
    }
}
