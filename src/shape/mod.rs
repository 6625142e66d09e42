//! Geometric primitives: linear families, circles, spheres and planes.
//!
//! The linear types (`Line`, `Ray`, `LineSegment` in 2D and 3D) share one
//! parametric form, `P(u) = p + u * v`, and differ only in which parameter
//! range they admit. Queries over these primitives live in [`crate::query`].

mod circle;
mod line2;
mod line3;
mod plane;
mod sphere;

pub use circle::Circle;
pub use line2::{Line2, LineSegment2, Ray2};
pub use line3::{Line3, LineSegment3, Ray3};
pub use plane::Plane;
pub use sphere::Sphere;

/// Admissible parameter range of a linear primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Extent {
    /// Any `u` (infinite line).
    Infinite,
    /// `u >= 0` (ray).
    Half,
    /// `0 <= u <= 1` (segment).
    Bounded,
}

impl Extent {
    pub(crate) fn contains(self, u: f64) -> bool {
        match self {
            Self::Infinite => true,
            Self::Half => u >= 0.0,
            Self::Bounded => (0.0..=1.0).contains(&u),
        }
    }

    /// An out-of-range parameter moved to the nearest admissible value.
    pub(crate) fn clamp(self, u: f64) -> f64 {
        if self.contains(u) {
            u
        } else {
            u.clamp(0.0, 1.0)
        }
    }
}
