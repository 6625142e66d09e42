//! Pairwise 3D algorithms in canonical argument order.
//!
//! As in [`super::algo_2d`], results are oriented with the first
//! endpoint on the first argument; mirrored operand orders are
//! reversed by the dispatch layer.

use crate::math::{Point3, Vector3, TOLERANCE};
use crate::shape::{Extent, Line3, LineSegment3, Plane, Sphere};

use super::Hit3;

/// A linear primitive reduced to its parametric form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Linear3 {
    pub p: Point3,
    pub v: Vector3,
    pub extent: Extent,
}

impl Linear3 {
    fn at(&self, u: f64) -> Point3 {
        self.p + self.v * u
    }

    fn project_param(&self, q: Point3) -> f64 {
        let d = self.v.magnitude_squared();
        if d == 0.0 {
            return 0.0;
        }
        self.extent.clamp((q - self.p).dot(&self.v) / d)
    }
}

pub(crate) fn intersect_point3_sphere(p: Point3, s: &Sphere) -> Option<Point3> {
    if (p - s.center()).magnitude() <= s.radius() {
        Some(p)
    } else {
        None
    }
}

/// Chord (or tangent point) of a linear primitive and a sphere, with
/// the quadratic roots clamped to the primitive's range before the
/// tangency test.
pub(crate) fn intersect_linear3_sphere(l: &Linear3, s: &Sphere) -> Option<Hit3> {
    let a = l.v.magnitude_squared();
    if a == 0.0 {
        return intersect_point3_sphere(l.p, s).map(Hit3::Point);
    }

    let b = 2.0
        * (l.v.x * (l.p.x - s.center().x)
            + l.v.y * (l.p.y - s.center().y)
            + l.v.z * (l.p.z - s.center().z));
    let c = (l.p - s.center()).magnitude_squared() - s.radius() * s.radius();
    let det = b * b - 4.0 * a * c;
    if det < 0.0 {
        return None;
    }

    let sq = det.sqrt();
    let u1 = l.extent.clamp((-b + sq) / (2.0 * a));
    let u2 = l.extent.clamp((-b - sq) / (2.0 * a));

    if (u1 - u2).abs() < TOLERANCE {
        return Some(Hit3::Point(l.at(u1)));
    }
    Some(Hit3::Segment(LineSegment3::from_points(l.at(u1), l.at(u2))))
}

/// Piercing point of a linear primitive through a plane, `None` when
/// parallel or out of the admissible range.
pub(crate) fn intersect_linear3_plane(l: &Linear3, pl: &Plane) -> Option<Point3> {
    let d = pl.normal().dot(&l.v);
    if d.abs() < TOLERANCE {
        return None;
    }
    let u = (pl.k() - pl.normal().dot(&l.p.to_vector())) / d;
    if !l.extent.contains(u) {
        return None;
    }
    Some(l.at(u))
}

/// Intersection line of two planes, `None` when parallel.
pub(crate) fn intersect_plane_plane(a: &Plane, b: &Plane) -> Option<Line3> {
    let n1_m = a.normal().magnitude_squared();
    let n2_m = b.normal().magnitude_squared();
    let n1d2 = a.normal().dot(&b.normal());
    let det = n1_m * n2_m - n1d2 * n1d2;
    if det.abs() < TOLERANCE {
        return None;
    }

    let c1 = (a.k() * n2_m - b.k() * n1d2) / det;
    let c2 = (b.k() * n1_m - a.k() * n1d2) / det;
    let p = Point3::from_vector(a.normal() * c1 + b.normal() * c2);
    // The cross product cannot vanish past the determinant test.
    Line3::new(p, a.normal().cross(&b.normal())).ok()
}

/// Shortest segment from a point to a linear primitive.
pub(crate) fn connect_point3_linear3(p: Point3, l: &Linear3) -> LineSegment3 {
    LineSegment3::from_points(p, l.at(l.project_param(p)))
}

/// Shortest segment from a point to a sphere's surface.
pub(crate) fn connect_point3_sphere(p: Point3, s: &Sphere) -> LineSegment3 {
    let v = (p - s.center()).normalized() * s.radius();
    LineSegment3::from_points(p, s.center() + v)
}

/// Shortest segment from a point to a plane (orthogonal drop).
pub(crate) fn connect_point3_plane(p: Point3, pl: &Plane) -> LineSegment3 {
    let n = pl.normal();
    let d = p.to_vector().dot(&n) - pl.k();
    LineSegment3::from_points(p, p - n * d)
}

/// Shortest segment between two linear primitives, via the standard
/// closest-point system. Parallel (or degenerate) primitives fall back
/// to endpoint connection as in the 2D case.
pub(crate) fn connect_linear3_linear3(a: &Linear3, b: &Linear3) -> LineSegment3 {
    let p13 = a.p - b.p;
    let d1343 = p13.dot(&b.v);
    let d4321 = b.v.dot(&a.v);
    let d1321 = p13.dot(&a.v);
    let d4343 = b.v.magnitude_squared();
    let denom = a.v.magnitude_squared() * d4343 - d4321 * d4321;
    if denom.abs() < TOLERANCE {
        if b.extent != Extent::Infinite {
            return connect_point3_linear3(b.p, a).reversed();
        }
        return connect_point3_linear3(a.p, b);
    }

    let ua = a.extent.clamp((d1343 * d4321 - d1321 * d4343) / denom);
    let ub = b.extent.clamp((d1343 + d4321 * ua) / d4343);
    LineSegment3::from_points(a.at(ua), b.at(ub))
}

/// Shortest segment from a linear primitive to a plane.
///
/// An in-range crossing touches the plane, which reads as the
/// zero-length segment at the piercing point; otherwise the nearest
/// admissible point is dropped onto the plane.
pub(crate) fn connect_linear3_plane(l: &Linear3, pl: &Plane) -> LineSegment3 {
    let d = pl.normal().dot(&l.v);
    if d.abs() < TOLERANCE {
        return connect_point3_plane(l.p, pl);
    }
    let u = (pl.k() - pl.normal().dot(&l.p.to_vector())) / d;
    if !l.extent.contains(u) {
        return connect_point3_plane(l.at(l.extent.clamp(u)), pl);
    }
    LineSegment3::new(l.at(u), Vector3::zero())
}

/// Shortest segment from a sphere's surface to a linear primitive.
pub(crate) fn connect_sphere_linear3(s: &Sphere, l: &Linear3) -> LineSegment3 {
    let foot = l.at(l.project_param(s.center()));
    let v = (foot - s.center()).normalized() * s.radius();
    LineSegment3::from_points(s.center() + v, foot)
}

/// Shortest segment between two sphere surfaces; `None` for
/// concentric spheres, whose direction is undefined.
pub(crate) fn connect_sphere_sphere(a: &Sphere, b: &Sphere) -> Option<LineSegment3> {
    let v = b.center() - a.center();
    let d = v.magnitude();
    if d < TOLERANCE {
        return None;
    }

    let (s1, s2) = if a.radius() >= b.radius() && d < a.radius() {
        // centre of b inside a
        (1.0, 1.0)
    } else if b.radius() > a.radius() && d < b.radius() {
        // centre of a inside b
        (-1.0, -1.0)
    } else {
        (1.0, -1.0)
    };

    let v = v.normalized();
    Some(LineSegment3::from_points(
        a.center() + v * (s1 * a.radius()),
        b.center() + v * (s2 * b.radius()),
    ))
}

/// Shortest segment from a sphere's surface to a plane, along the
/// center's orthogonal drop.
pub(crate) fn connect_sphere_plane(s: &Sphere, pl: &Plane) -> LineSegment3 {
    let foot = connect_point3_plane(s.center(), pl).p2();
    let v = (foot - s.center()).normalized() * s.radius();
    LineSegment3::from_points(s.center() + v, foot)
}

/// Shortest segment between two planes: a zero-length segment on the
/// intersection line when they cross, an orthogonal drop from an
/// arbitrary point when parallel.
pub(crate) fn connect_plane_plane(a: &Plane, b: &Plane) -> LineSegment3 {
    match intersect_plane_plane(a, b) {
        Some(line) => LineSegment3::new(line.p(), Vector3::zero()),
        None => connect_point3_plane(a.reference_point(), b),
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

    fn linear(anchor: Point3, v: Vector3, extent: Extent) -> Linear3 {
        Linear3 { p: anchor, v, extent }
    }

    #[test]
    fn skew_lines_connect_along_common_perpendicular() {
        let a = linear(p(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Extent::Infinite);
        let b = linear(p(0.0, 1.0, 2.0), Vector3::new(0.0, 0.0, 1.0), Extent::Infinite);
        let s = connect_linear3_linear3(&a, &b);
        assert_abs_diff_eq!(s.p1(), p(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(s.p2(), p(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_fall_back_to_anchor() {
        let a = linear(p(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Extent::Infinite);
        let b = linear(p(5.0, 3.0, 0.0), Vector3::new(2.0, 0.0, 0.0), Extent::Bounded);
        let s = connect_linear3_linear3(&a, &b);
        // Segment anchor dropped onto the line, reversed to start on a.
        assert_eq!(s.p1(), p(5.0, 0.0, 0.0));
        assert_eq!(s.p2(), p(5.0, 3.0, 0.0));
    }

    #[test]
    fn ray_pointing_away_from_plane_clamps_to_origin() {
        let pl = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0).unwrap();
        let r = linear(p(0.0, 0.0, 2.0), Vector3::new(0.0, 0.0, 1.0), Extent::Half);
        let s = connect_linear3_plane(&r, &pl);
        assert_eq!(s.p1(), p(0.0, 0.0, 2.0));
        assert_eq!(s.p2(), p(0.0, 0.0, 0.0));
    }

    #[test]
    fn crossing_line_touches_plane_with_zero_length() {
        let pl = Plane::new(Vector3::new(0.0, 0.0, 1.0), 1.0).unwrap();
        let l = linear(p(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), Extent::Infinite);
        let s = connect_linear3_plane(&l, &pl);
        assert_eq!(s.length(), 0.0);
        assert_eq!(s.p1(), p(2.0, 0.0, 1.0));
    }

    #[test]
    fn plane_intersection_line_lies_on_both() {
        let a = Plane::new(Vector3::new(0.0, 0.0, 1.0), 2.0).unwrap();
        let b = Plane::new(Vector3::new(1.0, 0.0, 0.0), 3.0).unwrap();
        let line = intersect_plane_plane(&a, &b).unwrap();
        let q = line.p().to_vector();
        assert!((a.normal().dot(&q) - a.k()).abs() < 1e-12);
        assert!((b.normal().dot(&q) - b.k()).abs() < 1e-12);
        // Direction along the cross of the normals.
        assert_abs_diff_eq!(line.v(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn parallel_planes_connect_orthogonally() {
        let a = Plane::new(Vector3::new(0.0, 1.0, 0.0), 1.0).unwrap();
        let b = Plane::new(Vector3::new(0.0, 2.0, 0.0), 4.0).unwrap();
        let s = connect_plane_plane(&a, &b);
        // The normal is rescaled to unit length but k stays as given,
        // so the planes sit at y = 1 and y = 4.
        assert!((s.length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn tangent_line_touches_sphere_at_a_point() {
        let s = Sphere::new(Point3::origin(), 2.0).unwrap();
        let l = linear(p(-5.0, 2.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Extent::Infinite);
        match intersect_linear3_sphere(&l, &s) {
            Some(Hit3::Point(q)) => assert_abs_diff_eq!(q, p(0.0, 2.0, 0.0), epsilon = 1e-9),
            other => panic!("expected tangent point, got {other:?}"),
        }
    }

    #[test]
    fn concentric_spheres_have_no_connection() {
        let a = Sphere::new(Point3::origin(), 1.0).unwrap();
        let b = Sphere::new(Point3::origin(), 2.0).unwrap();
        assert!(connect_sphere_sphere(&a, &b).is_none());
    }

    #[test]
    fn sphere_to_plane_drops_through_surface() {
        let s = Sphere::new(p(0.0, 0.0, 5.0), 1.0).unwrap();
        let pl = Plane::new(Vector3::new(0.0, 0.0, 1.0), 0.0).unwrap();
        let seg = connect_sphere_plane(&s, &pl);
        assert_abs_diff_eq!(seg.p1(), p(0.0, 0.0, 4.0), epsilon = 1e-12);
        assert_abs_diff_eq!(seg.p2(), p(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert!((seg.length() - 4.0).abs() < 1e-12);
    }
}
