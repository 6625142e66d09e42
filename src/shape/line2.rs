use crate::error::{EuklidError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::transform::Matrix3;

use super::Extent;

/// Rescales `v` to the requested length.
fn scaled(v: Vector2, length: f64) -> Result<Vector2> {
    if !length.is_finite() || length <= 0.0 {
        return Err(EuklidError::Domain {
            parameter: "length",
            value: length,
            reason: "must be finite and positive",
        });
    }
    let m = v.magnitude();
    if m < TOLERANCE {
        return Err(EuklidError::InvalidGeometry(
            "zero-length direction vector".into(),
        ));
    }
    Ok(v * (length / m))
}

/// An infinite line in the plane, `P(u) = p + u * v` for any `u`.
///
/// The direction is stored as given; the parameterization scales with
/// its magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    p: Point2,
    v: Vector2,
}

impl Line2 {
    /// Creates a line through `p` along `v`.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] if the direction is
    /// zero-length.
    pub fn new(p: Point2, v: Vector2) -> Result<Self> {
        if v.magnitude_squared() < TOLERANCE * TOLERANCE {
            return Err(EuklidError::InvalidGeometry(
                "line has zero-length direction vector".into(),
            ));
        }
        Ok(Self { p, v })
    }

    /// Creates the line through two points.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::InvalidGeometry`] if the points coincide.
    pub fn from_points(p1: Point2, p2: Point2) -> Result<Self> {
        Self::new(p1, p2 - p1)
    }

    /// Creates a line through `p` along `v` rescaled to `length`.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::Domain`] for a non-finite or non-positive
    /// length, [`EuklidError::InvalidGeometry`] for a zero direction.
    pub fn with_length(p: Point2, v: Vector2, length: f64) -> Result<Self> {
        Ok(Self {
            p,
            v: scaled(v, length)?,
        })
    }

    /// The anchor point.
    #[must_use]
    pub fn p(&self) -> Point2 {
        self.p
    }

    /// The direction vector, as given at construction.
    #[must_use]
    pub fn v(&self) -> Vector2 {
        self.v
    }

    /// The anchor point (`P(0)`).
    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.p
    }

    /// The point one direction-length from the anchor (`P(1)`).
    #[must_use]
    pub fn p2(&self) -> Point2 {
        self.p + self.v
    }

    /// Whether `u` is an admissible parameter (always, for a line).
    #[must_use]
    pub fn u_in(&self, u: f64) -> bool {
        Extent::Infinite.contains(u)
    }

    pub(crate) fn extent(&self) -> Extent {
        Extent::Infinite
    }

    /// The line mapped through a transform (anchor affinely, direction
    /// linearly).
    #[must_use]
    pub fn transformed(&self, m: &Matrix3) -> Self {
        Self {
            p: *m * self.p,
            v: *m * self.v,
        }
    }
}

/// A half-line, `P(u) = p + u * v` for `u >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    p: Point2,
    v: Vector2,
}

impl Ray2 {
    /// Creates a ray from `p` along `v`. A zero direction is accepted
    /// and describes the single point `p`.
    #[must_use]
    pub fn new(p: Point2, v: Vector2) -> Self {
        Self { p, v }
    }

    /// Creates the ray from `p1` towards `p2`.
    #[must_use]
    pub fn from_points(p1: Point2, p2: Point2) -> Self {
        Self::new(p1, p2 - p1)
    }

    /// Creates a ray from `p` along `v` rescaled to `length`.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::Domain`] for a non-finite or non-positive
    /// length, [`EuklidError::InvalidGeometry`] for a zero direction.
    pub fn with_length(p: Point2, v: Vector2, length: f64) -> Result<Self> {
        Ok(Self {
            p,
            v: scaled(v, length)?,
        })
    }

    /// The origin of the ray.
    #[must_use]
    pub fn p(&self) -> Point2 {
        self.p
    }

    /// The direction vector.
    #[must_use]
    pub fn v(&self) -> Vector2 {
        self.v
    }

    /// The origin (`P(0)`).
    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.p
    }

    /// The point one direction-length from the origin (`P(1)`).
    #[must_use]
    pub fn p2(&self) -> Point2 {
        self.p + self.v
    }

    /// Whether `u` is an admissible parameter (`u >= 0`).
    #[must_use]
    pub fn u_in(&self, u: f64) -> bool {
        Extent::Half.contains(u)
    }

    pub(crate) fn extent(&self) -> Extent {
        Extent::Half
    }

    /// The ray mapped through a transform.
    #[must_use]
    pub fn transformed(&self, m: &Matrix3) -> Self {
        Self {
            p: *m * self.p,
            v: *m * self.v,
        }
    }
}

/// A bounded segment, `P(u) = p + u * v` for `0 <= u <= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2 {
    p: Point2,
    v: Vector2,
}

impl LineSegment2 {
    /// Creates a segment from `p` spanning `v`. A zero span is accepted
    /// and describes the single point `p`.
    #[must_use]
    pub fn new(p: Point2, v: Vector2) -> Self {
        Self { p, v }
    }

    /// Creates the segment between two points.
    #[must_use]
    pub fn from_points(p1: Point2, p2: Point2) -> Self {
        Self::new(p1, p2 - p1)
    }

    /// Creates a segment from `p` along `v` rescaled to `length`.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::Domain`] for a non-finite or non-positive
    /// length, [`EuklidError::InvalidGeometry`] for a zero direction.
    pub fn with_length(p: Point2, v: Vector2, length: f64) -> Result<Self> {
        Ok(Self {
            p,
            v: scaled(v, length)?,
        })
    }

    /// The first endpoint's anchor.
    #[must_use]
    pub fn p(&self) -> Point2 {
        self.p
    }

    /// The span vector from the first endpoint to the second.
    #[must_use]
    pub fn v(&self) -> Vector2 {
        self.v
    }

    /// The first endpoint.
    #[must_use]
    pub fn p1(&self) -> Point2 {
        self.p
    }

    /// The second endpoint.
    #[must_use]
    pub fn p2(&self) -> Point2 {
        self.p + self.v
    }

    /// The segment's length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.v.magnitude()
    }

    /// The squared length.
    #[must_use]
    pub fn magnitude_squared(&self) -> f64 {
        self.v.magnitude_squared()
    }

    /// The same segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            p: self.p2(),
            v: -self.v,
        }
    }

    /// Whether `u` is an admissible parameter (`0 <= u <= 1`).
    #[must_use]
    pub fn u_in(&self, u: f64) -> bool {
        Extent::Bounded.contains(u)
    }

    pub(crate) fn extent(&self) -> Extent {
        Extent::Bounded
    }

    /// The segment mapped through a transform.
    #[must_use]
    pub fn transformed(&self, m: &Matrix3) -> Self {
        Self {
            p: *m * self.p,
            v: *m * self.v,
        }
    }
}

impl From<Line2> for Ray2 {
    fn from(l: Line2) -> Self {
        Self { p: l.p, v: l.v }
    }
}

impl From<Line2> for LineSegment2 {
    fn from(l: Line2) -> Self {
        Self { p: l.p, v: l.v }
    }
}

impl From<Ray2> for LineSegment2 {
    fn from(r: Ray2) -> Self {
        Self { p: r.p, v: r.v }
    }
}

impl From<LineSegment2> for Ray2 {
    fn from(s: LineSegment2) -> Self {
        Self { p: s.p, v: s.v }
    }
}

impl TryFrom<Ray2> for Line2 {
    type Error = EuklidError;

    /// Fails if the ray has a zero-length direction.
    fn try_from(r: Ray2) -> Result<Self> {
        Self::new(r.p, r.v)
    }
}

impl TryFrom<LineSegment2> for Line2 {
    type Error = EuklidError;

    /// Fails if the segment has coincident endpoints.
    fn try_from(s: LineSegment2) -> Result<Self> {
        Self::new(s.p, s.v)
    }
}
