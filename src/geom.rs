// Copyright 2026 The wedgeseq authors
// License: MIT
//
// Pure geometric helpers for the decomposition pipeline.
//
// Everything here operates in the input coordinate system: x grows to the
// right, y grows upward, polygons wind clockwise.

use glam::Vec2;

pub type Real = f32;

/// Cross product of the edges incident on `q`: (q - p) × (r - q).
///
/// For a clockwise polygon a convex corner gives a negative value and a
/// reflex corner a positive one; |cross| below the flatness tolerance means
/// p, q, r are collinear.
#[inline]
pub fn corner_cross(p: Vec2, q: Vec2, r: Vec2) -> Real {
    (q - p).perp_dot(r - q)
}

/// x-coordinate of the edge from (x, y) to (next_x, y + delta_y) at height
/// `at_y`. Callers guarantee `delta_y != 0`.
#[inline]
pub fn edge_x_at(x: Real, y: Real, next_x: Real, delta_y: Real, at_y: Real) -> Real {
    x + (next_x - x) / delta_y * (at_y - y)
}

/// Shoelace area of the polygon. Positive for counter-clockwise winding
/// (y-axis up), negative for clockwise, zero when fully collinear.
pub fn polygon_signed_area(points: &[Vec2]) -> Real {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    area * 0.5
}

/// True if segments (a, b) and (c, d) properly cross: the interiors
/// intersect in exactly one point. Shared endpoints and collinear overlaps
/// do not count.
pub fn segments_properly_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = (b - a).perp_dot(c - a);
    let d2 = (b - a).perp_dot(d - a);
    let d3 = (d - c).perp_dot(a - c);
    let d4 = (d - c).perp_dot(b - c);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn corner_cross_signs() {
        // Clockwise square corner at (0, 10): up then right = convex.
        let c = corner_cross(vec2(0.0, 0.0), vec2(0.0, 10.0), vec2(10.0, 10.0));
        assert!(c < 0.0);
        // Notch poking into a clockwise polygon = reflex.
        let c = corner_cross(vec2(0.0, 0.0), vec2(3.0, 5.0), vec2(0.0, 10.0));
        assert!(c > 0.0);
        // Straight through.
        let c = corner_cross(vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(2.0, 2.0));
        assert_eq!(c, 0.0);
    }

    #[test]
    fn edge_x_at_interpolates() {
        // Edge from (2, 0) to (0, 10): at y=6 the x is 0.8.
        let x = edge_x_at(2.0, 0.0, 0.0, 10.0, 6.0);
        assert!((x - 0.8).abs() < 1e-6, "got {}", x);
        // Endpoints reproduce exactly.
        assert_eq!(edge_x_at(2.0, 0.0, 0.0, 10.0, 0.0), 2.0);
    }

    #[test]
    fn signed_area_orientation() {
        let ccw = [vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)];
        assert!(polygon_signed_area(&ccw) > 0.0);
        let cw = [vec2(0.0, 0.0), vec2(0.0, 1.0), vec2(1.0, 1.0), vec2(1.0, 0.0)];
        assert!(polygon_signed_area(&cw) < 0.0);
        let line = [vec2(0.0, 0.0), vec2(1.0, 1.0), vec2(2.0, 2.0)];
        assert_eq!(polygon_signed_area(&line), 0.0);
    }

    #[test]
    fn proper_crossing() {
        assert!(segments_properly_cross(
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(0.0, 1.0),
            vec2(1.0, 0.0)
        ));
        // Shared endpoint is not a proper crossing.
        assert!(!segments_properly_cross(
            vec2(0.0, 0.0),
            vec2(1.0, 1.0),
            vec2(1.0, 1.0),
            vec2(2.0, 0.0)
        ));
        // Disjoint.
        assert!(!segments_properly_cross(
            vec2(0.0, 0.0),
            vec2(1.0, 0.0),
            vec2(0.0, 1.0),
            vec2(1.0, 1.0)
        ));
    }
}
