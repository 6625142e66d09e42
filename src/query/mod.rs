//! Uniform intersect / connect / distance queries over primitive pairs.
//!
//! Primitives are wrapped in the closed [`Shape2`] and [`Shape3`]
//! enumerations and every ordered pair dispatches through one `match`
//! to a pairwise routine in [`algo_2d`] / [`algo_3d`]. Each routine is
//! written for one canonical operand order; the mirrored order swaps
//! the arguments and reverses the resulting segment, so the first
//! endpoint of `a.connect(b)` always lies on `a`.

mod algo_2d;
mod algo_3d;

use crate::error::{EuklidError, Result};
use crate::math::{Point2, Point3};
use crate::shape::{
    Circle, Line2, Line3, LineSegment2, LineSegment3, Plane, Ray2, Ray3, Sphere,
};

use algo_2d::Linear2;
use algo_3d::Linear3;

/// Result of a 2D intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit2 {
    Point(Point2),
    Segment(LineSegment2),
}

/// Result of a 3D intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit3 {
    Point(Point3),
    Segment(LineSegment3),
    /// Two crossing planes meet in a line.
    Line(Line3),
}

/// Any 2D primitive, as accepted by the query operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape2 {
    Point(Point2),
    Line(Line2),
    Ray(Ray2),
    Segment(LineSegment2),
    Circle(Circle),
}

/// Any 3D primitive, as accepted by the query operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape3 {
    Point(Point3),
    Line(Line3),
    Ray(Ray3),
    Segment(LineSegment3),
    Sphere(Sphere),
    Plane(Plane),
}

impl From<Point2> for Shape2 {
    fn from(p: Point2) -> Self {
        Self::Point(p)
    }
}

impl From<Line2> for Shape2 {
    fn from(l: Line2) -> Self {
        Self::Line(l)
    }
}

impl From<Ray2> for Shape2 {
    fn from(r: Ray2) -> Self {
        Self::Ray(r)
    }
}

impl From<LineSegment2> for Shape2 {
    fn from(s: LineSegment2) -> Self {
        Self::Segment(s)
    }
}

impl From<Circle> for Shape2 {
    fn from(c: Circle) -> Self {
        Self::Circle(c)
    }
}

impl From<Point3> for Shape3 {
    fn from(p: Point3) -> Self {
        Self::Point(p)
    }
}

impl From<Line3> for Shape3 {
    fn from(l: Line3) -> Self {
        Self::Line(l)
    }
}

impl From<Ray3> for Shape3 {
    fn from(r: Ray3) -> Self {
        Self::Ray(r)
    }
}

impl From<LineSegment3> for Shape3 {
    fn from(s: LineSegment3) -> Self {
        Self::Segment(s)
    }
}

impl From<Sphere> for Shape3 {
    fn from(s: Sphere) -> Self {
        Self::Sphere(s)
    }
}

impl From<Plane> for Shape3 {
    fn from(p: Plane) -> Self {
        Self::Plane(p)
    }
}

/// A 2D operand collapsed to its algorithmic role: the three linear
/// family members share every pairwise routine.
enum Op2 {
    Point(Point2),
    Linear(Linear2),
    Circle(Circle),
}

enum Op3 {
    Point(Point3),
    Linear(Linear3),
    Sphere(Sphere),
    Plane(Plane),
}

impl Shape2 {
    /// The primitive's name, as reported in `UnsupportedGeometry`
    /// errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Ray(_) => "ray",
            Self::Segment(_) => "line segment",
            Self::Circle(_) => "circle",
        }
    }

    fn op(&self) -> Op2 {
        match self {
            Self::Point(p) => Op2::Point(*p),
            Self::Line(l) => Op2::Linear(Linear2 {
                p: l.p(),
                v: l.v(),
                extent: l.extent(),
            }),
            Self::Ray(r) => Op2::Linear(Linear2 {
                p: r.p(),
                v: r.v(),
                extent: r.extent(),
            }),
            Self::Segment(s) => Op2::Linear(Linear2 {
                p: s.p(),
                v: s.v(),
                extent: s.extent(),
            }),
            Self::Circle(c) => Op2::Circle(*c),
        }
    }

    fn unsupported(&self, operation: &'static str, other: &Self) -> EuklidError {
        EuklidError::UnsupportedGeometry {
            operation,
            lhs: self.kind(),
            rhs: other.kind(),
        }
    }

    /// Computes the intersection of two primitives.
    ///
    /// `Ok(None)` means the primitives do not meet; a point or segment
    /// hit is symmetric in the operand order.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::UnsupportedGeometry`] for pairs without
    /// an intersection algorithm (point–point, point–line and
    /// circle–circle).
    pub fn intersect(&self, other: &Self) -> Result<Option<Hit2>> {
        match (self.op(), other.op()) {
            (Op2::Point(p), Op2::Circle(c)) | (Op2::Circle(c), Op2::Point(p)) => {
                Ok(algo_2d::intersect_point2_circle(p, &c).map(Hit2::Point))
            }
            (Op2::Linear(a), Op2::Linear(b)) => {
                Ok(algo_2d::intersect_linear2_linear2(&a, &b).map(Hit2::Point))
            }
            (Op2::Linear(l), Op2::Circle(c)) | (Op2::Circle(c), Op2::Linear(l)) => {
                Ok(algo_2d::intersect_linear2_circle(&l, &c))
            }
            _ => Err(self.unsupported("intersect", other)),
        }
    }

    /// Computes the shortest connecting segment between two
    /// primitives, oriented from `self` to `other`.
    ///
    /// `Ok(None)` is reserved for pairs with no defined connection
    /// (concentric circles).
    ///
    /// # Errors
    ///
    /// Every 2D pair is supported; the `Result` wrapper matches the
    /// other query operations.
    #[allow(clippy::unnecessary_wraps)]
    pub fn connect(&self, other: &Self) -> Result<Option<LineSegment2>> {
        Ok(match (self.op(), other.op()) {
            (Op2::Point(a), Op2::Point(b)) => Some(LineSegment2::from_points(a, b)),
            (Op2::Point(p), Op2::Linear(l)) => Some(algo_2d::connect_point2_linear2(p, &l)),
            (Op2::Linear(l), Op2::Point(p)) => {
                Some(algo_2d::connect_point2_linear2(p, &l).reversed())
            }
            (Op2::Point(p), Op2::Circle(c)) => Some(algo_2d::connect_point2_circle(p, &c)),
            (Op2::Circle(c), Op2::Point(p)) => {
                Some(algo_2d::connect_point2_circle(p, &c).reversed())
            }
            (Op2::Linear(a), Op2::Linear(b)) => Some(algo_2d::connect_linear2_linear2(&a, &b)),
            (Op2::Circle(c), Op2::Linear(l)) => Some(algo_2d::connect_circle_linear2(&c, &l)),
            (Op2::Linear(l), Op2::Circle(c)) => {
                Some(algo_2d::connect_circle_linear2(&c, &l).reversed())
            }
            (Op2::Circle(a), Op2::Circle(b)) => algo_2d::connect_circle_circle(&a, &b),
        })
    }

    /// The length of the connecting segment; `0.0` when the primitives
    /// touch or no connection is defined.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`connect`](Self::connect).
    pub fn distance(&self, other: &Self) -> Result<f64> {
        Ok(self.connect(other)?.map_or(0.0, |s| s.length()))
    }
}

impl Shape3 {
    /// The primitive's name, as reported in `UnsupportedGeometry`
    /// errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Ray(_) => "ray",
            Self::Segment(_) => "line segment",
            Self::Sphere(_) => "sphere",
            Self::Plane(_) => "plane",
        }
    }

    fn op(&self) -> Op3 {
        match self {
            Self::Point(p) => Op3::Point(*p),
            Self::Line(l) => Op3::Linear(Linear3 {
                p: l.p(),
                v: l.v(),
                extent: l.extent(),
            }),
            Self::Ray(r) => Op3::Linear(Linear3 {
                p: r.p(),
                v: r.v(),
                extent: r.extent(),
            }),
            Self::Segment(s) => Op3::Linear(Linear3 {
                p: s.p(),
                v: s.v(),
                extent: s.extent(),
            }),
            Self::Sphere(s) => Op3::Sphere(*s),
            Self::Plane(p) => Op3::Plane(*p),
        }
    }

    fn unsupported(&self, operation: &'static str, other: &Self) -> EuklidError {
        EuklidError::UnsupportedGeometry {
            operation,
            lhs: self.kind(),
            rhs: other.kind(),
        }
    }

    /// Computes the intersection of two primitives.
    ///
    /// # Errors
    ///
    /// Returns [`EuklidError::UnsupportedGeometry`] for pairs without
    /// an intersection algorithm; the supported pairs are
    /// point–sphere, line–sphere, line–plane and plane–plane.
    pub fn intersect(&self, other: &Self) -> Result<Option<Hit3>> {
        match (self.op(), other.op()) {
            (Op3::Point(p), Op3::Sphere(s)) | (Op3::Sphere(s), Op3::Point(p)) => {
                Ok(algo_3d::intersect_point3_sphere(p, &s).map(Hit3::Point))
            }
            (Op3::Linear(l), Op3::Sphere(s)) | (Op3::Sphere(s), Op3::Linear(l)) => {
                Ok(algo_3d::intersect_linear3_sphere(&l, &s))
            }
            (Op3::Linear(l), Op3::Plane(pl)) | (Op3::Plane(pl), Op3::Linear(l)) => {
                Ok(algo_3d::intersect_linear3_plane(&l, &pl).map(Hit3::Point))
            }
            (Op3::Plane(a), Op3::Plane(b)) => {
                Ok(algo_3d::intersect_plane_plane(&a, &b).map(Hit3::Line))
            }
            _ => Err(self.unsupported("intersect", other)),
        }
    }

    /// Computes the shortest connecting segment between two
    /// primitives, oriented from `self` to `other`.
    ///
    /// `Ok(None)` is reserved for pairs with no defined connection
    /// (concentric spheres).
    ///
    /// # Errors
    ///
    /// Every 3D pair is supported; the `Result` wrapper matches the
    /// other query operations.
    #[allow(clippy::unnecessary_wraps)]
    pub fn connect(&self, other: &Self) -> Result<Option<LineSegment3>> {
        Ok(match (self.op(), other.op()) {
            (Op3::Point(a), Op3::Point(b)) => Some(LineSegment3::from_points(a, b)),
            (Op3::Point(p), Op3::Linear(l)) => Some(algo_3d::connect_point3_linear3(p, &l)),
            (Op3::Linear(l), Op3::Point(p)) => {
                Some(algo_3d::connect_point3_linear3(p, &l).reversed())
            }
            (Op3::Point(p), Op3::Sphere(s)) => Some(algo_3d::connect_point3_sphere(p, &s)),
            (Op3::Sphere(s), Op3::Point(p)) => {
                Some(algo_3d::connect_point3_sphere(p, &s).reversed())
            }
            (Op3::Point(p), Op3::Plane(pl)) => Some(algo_3d::connect_point3_plane(p, &pl)),
            (Op3::Plane(pl), Op3::Point(p)) => {
                Some(algo_3d::connect_point3_plane(p, &pl).reversed())
            }
            (Op3::Linear(a), Op3::Linear(b)) => Some(algo_3d::connect_linear3_linear3(&a, &b)),
            (Op3::Linear(l), Op3::Plane(pl)) => Some(algo_3d::connect_linear3_plane(&l, &pl)),
            (Op3::Plane(pl), Op3::Linear(l)) => {
                Some(algo_3d::connect_linear3_plane(&l, &pl).reversed())
            }
            (Op3::Sphere(s), Op3::Linear(l)) => Some(algo_3d::connect_sphere_linear3(&s, &l)),
            (Op3::Linear(l), Op3::Sphere(s)) => {
                Some(algo_3d::connect_sphere_linear3(&s, &l).reversed())
            }
            (Op3::Sphere(a), Op3::Sphere(b)) => algo_3d::connect_sphere_sphere(&a, &b),
            (Op3::Sphere(s), Op3::Plane(pl)) => Some(algo_3d::connect_sphere_plane(&s, &pl)),
            (Op3::Plane(pl), Op3::Sphere(s)) => {
                Some(algo_3d::connect_sphere_plane(&s, &pl).reversed())
            }
            (Op3::Plane(a), Op3::Plane(b)) => Some(algo_3d::connect_plane_plane(&a, &b)),
        })
    }

    /// The length of the connecting segment; `0.0` when the primitives
    /// touch or no connection is defined.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`connect`](Self::connect).
    pub fn distance(&self, other: &Self) -> Result<f64> {
        Ok(self.connect(other)?.map_or(0.0, |s| s.length()))
    }
}
