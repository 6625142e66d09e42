use crate::error::{EuklidError, Result};
use crate::math::Point3;
use crate::transform::Matrix4;

/// A sphere, center plus non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    c: Point3,
    r: f64,
}

impl Sphere {
    /// Creates a sphere.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::Domain`] if the radius is negative or not
    /// finite.
    pub fn new(center: Point3, radius: f64) -> Result<Self> {
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
    pub fn center(&self) -> Point3 {
        self.c
    }

    /// The radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.r
    }

    /// The sphere with its center mapped through a transform. The
    /// radius is unchanged, so the result is exact only for rigid
    /// transforms.
    #[must_use]
    pub fn transformed(&self, m: &Matrix4) -> Self {
        Self {
            c: *m * self.c,
            r: self.r,
        }
    }
}
