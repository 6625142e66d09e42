//! Pairwise 2D algorithms in canonical argument order.
//!
//! Every routine here returns results oriented so that the first
//! endpoint lies on the first argument; the dispatch layer in
//! [`super`] reverses segments for mirrored operand orders.

use crate::math::{Point2, Vector2, TOLERANCE};
use crate::shape::{Circle, Extent, LineSegment2};

use super::Hit2;

/// A linear primitive reduced to its parametric form.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Linear2 {
    pub p: Point2,
    pub v: Vector2,
    pub extent: Extent,
}

impl Linear2 {
    fn at(&self, u: f64) -> Point2 {
        self.p + self.v * u
    }

    /// Parameter of the orthogonal projection of `q`, clamped to the
    /// admissible range. A degenerate (zero-direction) primitive
    /// projects everything onto its anchor.
    fn project_param(&self, q: Point2) -> f64 {
        let d = self.v.magnitude_squared();
        if d == 0.0 {
            return 0.0;
        }
        self.extent.clamp((q - self.p).dot(&self.v) / d)
    }
}

pub(crate) fn intersect_point2_circle(p: Point2, c: &Circle) -> Option<Point2> {
    if (p - c.center()).magnitude() <= c.radius() {
        Some(p)
    } else {
        None
    }
}

/// Intersection point of two linear primitives, `None` when parallel
/// or when the solution parameter leaves either admissible range.
pub(crate) fn intersect_linear2_linear2(a: &Linear2, b: &Linear2) -> Option<Point2> {
    let d = b.v.y * a.v.x - b.v.x * a.v.y;
    if d.abs() < TOLERANCE {
        return None;
    }

    let dy = a.p.y - b.p.y;
    let dx = a.p.x - b.p.x;
    let ua = (b.v.x * dy - b.v.y * dx) / d;
    if !a.extent.contains(ua) {
        return None;
    }
    let ub = (a.v.x * dy - a.v.y * dx) / d;
    if !b.extent.contains(ub) {
        return None;
    }

    Some(a.at(ua))
}

/// Chord (or tangent point) of a linear primitive and a circle.
///
/// The quadratic roots are clamped to the primitive's range before the
/// tangency test, so a chord entirely out of range collapses onto the
/// nearest endpoint.
pub(crate) fn intersect_linear2_circle(l: &Linear2, c: &Circle) -> Option<Hit2> {
    let a = l.v.magnitude_squared();
    if a == 0.0 {
        return intersect_point2_circle(l.p, c).map(Hit2::Point);
    }

    let b = 2.0 * (l.v.x * (l.p.x - c.center().x) + l.v.y * (l.p.y - c.center().y));
    let cc = (l.p - c.center()).magnitude_squared() - c.radius() * c.radius();
    let det = b * b - 4.0 * a * cc;
    if det < 0.0 {
        return None;
    }

    let sq = det.sqrt();
    let u1 = l.extent.clamp((-b + sq) / (2.0 * a));
    let u2 = l.extent.clamp((-b - sq) / (2.0 * a));

    if (u1 - u2).abs() < TOLERANCE {
        return Some(Hit2::Point(l.at(u1)));
    }
    Some(Hit2::Segment(LineSegment2::from_points(l.at(u1), l.at(u2))))
}

/// Shortest segment from a point to a linear primitive.
pub(crate) fn connect_point2_linear2(p: Point2, l: &Linear2) -> LineSegment2 {
    LineSegment2::from_points(p, l.at(l.project_param(p)))
}

/// Shortest segment from a point to a circle's boundary. A point at
/// the center yields the zero-length segment at the center.
pub(crate) fn connect_point2_circle(p: Point2, c: &Circle) -> LineSegment2 {
    let v = (p - c.center()).normalized() * c.radius();
    LineSegment2::from_points(p, c.center() + v)
}

/// Shortest segment between two linear primitives.
///
/// Parallel primitives fall back to connecting an endpoint: the second
/// operand's anchor when it is bounded, the first operand's anchor
/// (an arbitrary choice) when both extend forever. The anchor choice
/// depends on operand order, so swapping parallel operands may pick a
/// different witness segment; only the non-parallel case reverses
/// exactly under swap.
pub(crate) fn connect_linear2_linear2(a: &Linear2, b: &Linear2) -> LineSegment2 {
    let d = b.v.y * a.v.x - b.v.x * a.v.y;
    if d.abs() < TOLERANCE {
        if b.extent != Extent::Infinite {
            return connect_point2_linear2(b.p, a).reversed();
        }
        return connect_point2_linear2(a.p, b);
    }

    let dy = a.p.y - b.p.y;
    let dx = a.p.x - b.p.x;
    let ua = a.extent.clamp((b.v.x * dy - b.v.y * dx) / d);
    let ub = b.extent.clamp((a.v.x * dy - a.v.y * dx) / d);
    LineSegment2::from_points(a.at(ua), b.at(ub))
}

/// Shortest segment from a circle's boundary to a linear primitive.
pub(crate) fn connect_circle_linear2(c: &Circle, l: &Linear2) -> LineSegment2 {
    let foot = l.at(l.project_param(c.center()));
    let v = (foot - c.center()).normalized() * c.radius();
    LineSegment2::from_points(c.center() + v, foot)
}

/// Shortest segment between two circle boundaries, oriented along the
/// center line with signs chosen by containment. Concentric circles
/// leave the direction undefined and yield `None`.
pub(crate) fn connect_circle_circle(a: &Circle, b: &Circle) -> Option<LineSegment2> {
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
    Some(LineSegment2::from_points(
        a.center() + v * (s1 * a.radius()),
        b.center() + v * (s2 * b.radius()),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn linear(px: f64, py: f64, vx: f64, vy: f64, extent: Extent) -> Linear2 {
        Linear2 {
            p: p(px, py),
            v: Vector2::new(vx, vy),
            extent,
        }
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let a = linear(0.0, 0.0, 1.0, 0.0, Extent::Infinite);
        let b = linear(0.0, 1.0, 2.0, 0.0, Extent::Infinite);
        assert!(intersect_linear2_linear2(&a, &b).is_none());
    }

    #[test]
    fn segment_intersection_out_of_range_is_none() {
        // The carrier lines cross at (5, 0), beyond the first segment.
        let a = linear(0.0, 0.0, 1.0, 0.0, Extent::Bounded);
        let b = linear(5.0, -1.0, 0.0, 2.0, Extent::Bounded);
        assert!(intersect_linear2_linear2(&a, &b).is_none());
    }

    #[test]
    fn parallel_connect_uses_bounded_anchor() {
        let a = linear(0.0, 0.0, 10.0, 0.0, Extent::Infinite);
        let b = linear(3.0, 2.0, 1.0, 0.0, Extent::Bounded);
        let s = connect_linear2_linear2(&a, &b);
        assert_eq!(s.p1(), p(3.0, 0.0));
        assert_eq!(s.p2(), p(3.0, 2.0));
    }

    #[test]
    fn parallel_infinite_lines_connect_at_arbitrary_anchor() {
        let a = linear(1.0, 0.0, 1.0, 0.0, Extent::Infinite);
        let b = linear(0.0, 4.0, -2.0, 0.0, Extent::Infinite);
        let s = connect_linear2_linear2(&a, &b);
        assert_eq!(s.p1(), p(1.0, 0.0));
        assert!((s.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_bounded_connect_depends_on_operand_order() {
        // Each order projects the other operand's anchor, so the two
        // witness segments (and their lengths) differ.
        let a = linear(0.0, 0.0, 1.0, 0.0, Extent::Bounded);
        let b = linear(5.0, 1.0, 1.0, 0.0, Extent::Bounded);

        let ab = connect_linear2_linear2(&a, &b);
        assert_eq!(ab.p1(), p(1.0, 0.0));
        assert_eq!(ab.p2(), p(5.0, 1.0));

        let ba = connect_linear2_linear2(&b, &a);
        assert_eq!(ba.p1(), p(5.0, 1.0));
        assert_eq!(ba.p2(), p(0.0, 0.0));

        assert!((ab.length() - 17.0_f64.sqrt()).abs() < 1e-12);
        assert!((ba.length() - 26.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn chord_clamps_to_segment_range() {
        // Segment stops at x = 1 inside a radius-3 circle.
        let l = linear(-5.0, 0.0, 6.0, 0.0, Extent::Bounded);
        let c = Circle::new(Point2::origin(), 3.0).unwrap();
        match intersect_linear2_circle(&l, &c) {
            Some(Hit2::Segment(s)) => {
                assert_eq!(s.p1(), p(1.0, 0.0));
                assert_eq!(s.p2(), p(-3.0, 0.0));
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn concentric_circles_have_no_connection() {
        let a = Circle::new(Point2::origin(), 1.0).unwrap();
        let b = Circle::new(Point2::origin(), 3.0).unwrap();
        assert!(connect_circle_circle(&a, &b).is_none());
    }

    #[test]
    fn nested_circles_connect_outward() {
        let a = Circle::new(Point2::origin(), 5.0).unwrap();
        let b = Circle::new(p(1.0, 0.0), 1.0).unwrap();
        let s = connect_circle_circle(&a, &b);
        let s = s.unwrap();
        // Both endpoints on the +x side: boundary of a at (5, 0),
        // boundary of b at (2, 0).
        assert_eq!(s.p1(), p(5.0, 0.0));
        assert_eq!(s.p2(), p(2.0, 0.0));
    }

    #[test]
    fn point_at_circle_center_connects_to_center() {
        let c = Circle::new(p(2.0, 2.0), 1.5).unwrap();
        let s = connect_point2_circle(p(2.0, 2.0), &c);
        assert_eq!(s.p2(), p(2.0, 2.0));
        assert_eq!(s.length(), 0.0);
    }
}
