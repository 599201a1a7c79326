// Copyright 2026 The wedgeseq authors
// Shared test utilities for wedgeseq tests.

#![allow(dead_code)]

use glam::Vec2;
use wedgeseq::{Decomposition, WedgeKind, WedgeSequence};

/// Absolute shoelace area of a polygon outline.
pub fn outline_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    (area * 0.5).abs()
}

/// Integrate one sequence the way a scan converter would: walk elements top
/// to bottom, carrying a left and right edge position, and accumulate the
/// trapezoid areas. Also checks structural invariants along the way.
pub fn sequence_area(ws: &WedgeSequence) -> f32 {
    assert!(!ws.elements.is_empty(), "sequence has no elements");
    let eps = 1e-3 * (1.0 + ws.width.abs() + ws.height.abs());

    let first = &ws.elements[0];
    assert_eq!(first.kind, WedgeKind::Both, "first element must be Both");
    let mut xl = ws.x + first.l_corr;
    let mut xr = ws.x + first.r_corr;
    let mut l_slope = first.l_slope;
    let mut r_slope = first.r_slope;

    let mut area = 0.0;
    let mut height_sum = 0.0;
    for (i, e) in ws.elements.iter().enumerate() {
        assert_eq!(
            e.last,
            i + 1 == ws.elements.len(),
            "last flag misplaced at element {}",
            i
        );
        if i > 0 {
            match e.kind {
                WedgeKind::Left => {
                    xl += e.l_corr;
                    l_slope = e.l_slope;
                }
                WedgeKind::Right => {
                    xr += e.r_corr;
                    r_slope = e.r_slope;
                }
                WedgeKind::Both => {
                    xl += e.l_corr;
                    xr += e.r_corr;
                    l_slope = e.l_slope;
                    r_slope = e.r_slope;
                }
            }
        }
        assert!(e.height > 0.0, "element {} has height {}", i, e.height);
        let bl = xl - l_slope * e.height;
        let br = xr - r_slope * e.height;
        for x in [xl, xr, bl, br] {
            assert!(
                x >= ws.x - eps && x <= ws.x + ws.width + eps,
                "edge position {} outside bounding box [{}, {}]",
                x,
                ws.x,
                ws.x + ws.width
            );
        }
        assert!(xl <= xr + eps, "left edge {} right of right edge {}", xl, xr);
        assert!(bl <= br + eps, "left edge {} right of right edge {}", bl, br);
        area += e.height * ((xr - xl) + (br - bl)) * 0.5;
        height_sum += e.height;
        xl = bl;
        xr = br;
    }
    assert!(
        (height_sum - ws.height).abs() < eps,
        "element heights sum to {}, sequence height is {}",
        height_sum,
        ws.height
    );
    area
}

/// Total covered area over all sequences of a decomposition.
pub fn total_area(d: &Decomposition) -> f32 {
    d.sequences().iter().map(sequence_area).sum()
}

/// Decompose and assert the sequences exactly cover the outline's area.
pub fn assert_covers_outline(points: &[Vec2]) -> Decomposition {
    let d = wedgeseq::decompose(points).expect("decomposition failed");
    let expect = outline_area(points);
    let got = total_area(&d);
    let tol = 1e-3 * (1.0 + expect);
    assert!(
        (got - expect).abs() < tol,
        "sequences cover area {}, outline encloses {}",
        got,
        expect
    );
    d
}
