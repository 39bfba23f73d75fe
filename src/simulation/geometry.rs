//! Segment and polygon intersection used by ray casting and collision checks.
//!
//! All coordinates are screen-space: `x` grows to the right, `y` grows
//! downwards, and a heading of `0` points "up" the road (towards `-y`).

use geo::{Coord, Line};

/// A plane coordinate.
pub type Point = Coord<f32>;

/// An ordered pair of points. Intersection tests treat it as directionless.
pub type Segment = Line<f32>;

/// The nearest obstruction found along a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Where the two segments cross.
    pub point: Point,
    /// Fractional distance in `[0, 1]` along the first segment.
    pub offset: f32,
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Intersects two segments.
///
/// Solves the parametric system `a.start + t·a.delta = b.start + u·b.delta`
/// and reports the crossing only when both `t` and `u` lie in `[0, 1]`.
///
/// # Arguments
///
/// * `a` - Segment whose parameter is reported as the offset
/// * `b` - Segment tested against `a`
///
/// # Returns
///
/// The crossing point with `offset = t`, or `None` for parallel, coincident
/// or non-overlapping segments.
#[allow(clippy::float_cmp)]
pub fn intersect(a: &Segment, b: &Segment) -> Option<Reading> {
    let (p, q) = (a.start, a.end);
    let (r, s) = (b.start, b.end);

    let t_top = (s.x - r.x) * (p.y - r.y) - (s.y - r.y) * (p.x - r.x);
    let u_top = (r.y - p.y) * (p.x - q.x) - (r.x - p.x) * (p.y - q.y);
    let bottom = (s.y - r.y) * (q.x - p.x) - (s.x - r.x) * (q.y - p.y);

    if bottom == 0.0 {
        return None;
    }

    let t = t_top / bottom;
    let u = u_top / bottom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(Reading {
        point: p + a.delta() * t,
        offset: t,
    })
}

/// Iterates the edges of a closed ring of points, including the closing edge.
///
/// A two-point ring yields the segment twice (once in each direction), which
/// matches how a road border behaves when treated as a degenerate polygon.
pub fn ring_edges(points: &[Point]) -> impl Iterator<Item = Segment> + Clone + '_ {
    let n = points.len();
    (0..n).map(move |i| Line::new(points[i], points[(i + 1) % n]))
}

/// Returns `true` when any edge of `a` intersects any edge of `b`.
///
/// Containment without edge contact is not reported.
pub fn polygons_intersect(a: &[Point], b: &[Point]) -> bool {
    ring_edges(a).any(|edge_a| ring_edges(b).any(|edge_b| intersect(&edge_a, &edge_b).is_some()))
}

/// The rotated rectangle a car occupies.
///
/// Corners are ordered front-right, front-left, rear-left, rear-right for a
/// car facing up the road.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    corners: [Point; 4],
}

impl Hull {
    /// Builds the hull from a centre, heading and body dimensions.
    ///
    /// Each corner sits at half the body diagonal from the centre, rotated
    /// `±atan2(width, height)` away from the heading (front) or from the
    /// opposite heading (rear).
    pub fn new(center: Point, heading: f32, width: f32, height: f32) -> Self {
        let radius = width.hypot(height) / 2.0;
        let alpha = width.atan2(height);
        let corner = |angle: f32| Point {
            x: center.x - angle.sin() * radius,
            y: center.y - angle.cos() * radius,
        };

        Self {
            corners: [
                corner(heading - alpha),
                corner(heading + alpha),
                corner(std::f32::consts::PI + heading - alpha),
                corner(std::f32::consts::PI + heading + alpha),
            ],
        }
    }

    /// Returns the four corners.
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Iterates the four edges of the hull.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + Clone + '_ {
        ring_edges(&self.corners)
    }

    /// Returns `true` when an edge of this hull crosses `segment`.
    pub fn touches(&self, segment: &Segment) -> bool {
        self.edges().any(|edge| intersect(&edge, segment).is_some())
    }

    /// Returns `true` when an edge of this hull crosses an edge of `other`.
    pub fn intersects(&self, other: &Hull) -> bool {
        polygons_intersect(&self.corners, &other.corners)
    }

    /// Returns a copy shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let offset = Point { x: dx, y: dy };
        Self {
            corners: self.corners.map(|c| c + offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
        Line::new(Point { x: x1, y: y1 }, Point { x: x2, y: y2 })
    }

    #[test]
    fn crossing_diagonals_meet_in_the_middle() {
        let hit = intersect(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0)).unwrap();
        assert!((hit.point.x - 1.0).abs() < 1e-6);
        assert!((hit.point.y - 1.0).abs() < 1e-6);
        assert!((hit.offset - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ring_edges_close_the_ring() {
        let square = [
            Point { x: 0.0, y: 0.0 },
            Point { x: 1.0, y: 0.0 },
            Point { x: 1.0, y: 1.0 },
            Point { x: 0.0, y: 1.0 },
        ];
        let edges: Vec<Segment> = ring_edges(&square).collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].end, square[0]);
    }
}
