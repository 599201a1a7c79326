// Copyright 2026 The wedgeseq authors
// Outlines with reflex vertices: chain splits and multi-sequence output.

mod helpers;

use glam::vec2;
use wedgeseq::WedgeKind;

#[test]
fn w_shape_two_teeth() {
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(10.0, 10.0),
        vec2(8.0, 0.0),
        vec2(5.0, 6.0),
        vec2(2.0, 0.0),
    ]);
    assert_eq!(d.sequences().len(), 2);
}

#[test]
fn comb_three_teeth() {
    // Two interior peaks at the same height split off two extra windows.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(14.0, 10.0),
        vec2(12.0, 0.0),
        vec2(9.0, 6.0),
        vec2(7.0, 0.0),
        vec2(5.0, 6.0),
        vec2(2.0, 0.0),
    ]);
    assert_eq!(d.sequences().len(), 3);
}

#[test]
fn reflex_vertex_aligned_with_cusp_stays_single() {
    // The reflex vertex at (3, 5) sits level with the down cusp at (10, 5):
    // no window split is needed.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(10.0, 5.0),
        vec2(0.0, 0.0),
        vec2(3.0, 5.0),
    ]);
    assert_eq!(d.sequences().len(), 1);
    assert_eq!(d.sequences()[0].elements.len(), 2);
}

#[test]
fn notched_top_reflex_valley() {
    // A dip in the top edge whose low point leans left of the dip's right
    // rim. The valley is reflex but neither chain neighbor bounds its
    // window, so the sweep has to search the join ring for it.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(6.0, 8.0),
        vec2(4.0, 4.0),
        vec2(10.0, 10.0),
        vec2(10.0, 0.0),
        vec2(0.0, 0.0),
    ]);
    let seqs = d.sequences();
    assert_eq!(seqs.len(), 2);

    // Left of the valley: the sliver between the left wall and the dip.
    let left = &seqs[0];
    assert_eq!(left.y, 10.0);
    assert_eq!(left.height, 6.0);
    assert_eq!(left.x, 0.0);
    assert_eq!(left.width, 6.0);
    assert_eq!(left.elements.len(), 2);
    assert_eq!(left.elements[0].kind, WedgeKind::Both);
    assert_eq!(left.elements[1].kind, WedgeKind::Right);

    // Right of the valley: everything below and right of the dip.
    let right = &seqs[1];
    assert_eq!(right.y, 10.0);
    assert_eq!(right.height, 10.0);
    assert_eq!(right.width, 10.0);
    assert_eq!(right.elements.len(), 2);
    assert_eq!(right.elements[0].kind, WedgeKind::Both);
    assert_eq!(right.elements[1].kind, WedgeKind::Left);
}

#[test]
fn m_shape_notch_from_top() {
    // Symmetric dip in the top edge down to y=4.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(5.0, 4.0),
        vec2(10.0, 10.0),
        vec2(10.0, 0.0),
        vec2(0.0, 0.0),
    ]);
    assert_eq!(d.sequences().len(), 2);
}

#[test]
fn valley_aligned_with_flank_corner() {
    // The reflex valley at (5, 4) sits exactly level with the left flank's
    // corner at (-1, 4), so the split lands on a window vertex instead of
    // the interior of a window edge.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(5.0, 4.0),
        vec2(10.0, 10.0),
        vec2(10.0, 0.0),
        vec2(0.0, 0.0),
        vec2(-1.0, 4.0),
    ]);
    let seqs = d.sequences();
    assert_eq!(seqs.len(), 2);

    // Triangle between the left wall and the dip, down to the corner's y.
    let left = &seqs[0];
    assert_eq!(left.x, -1.0);
    assert_eq!(left.y, 10.0);
    assert_eq!(left.width, 6.0);
    assert_eq!(left.height, 6.0);
    assert_eq!(left.elements.len(), 1);
    assert_eq!(left.elements[0].kind, WedgeKind::Both);

    let right = &seqs[1];
    assert_eq!(right.height, 10.0);
    assert_eq!(right.width, 11.0);
    assert_eq!(right.elements.len(), 2);
    assert_eq!(right.elements[1].kind, WedgeKind::Left);
}

#[test]
fn peak_aligned_with_flank_corner() {
    // W variant whose left flank has a corner at (0.5, 6), exactly level
    // with the middle peak: the peak split reuses the flank vertex height
    // instead of cutting an edge.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(10.0, 10.0),
        vec2(8.0, 0.0),
        vec2(5.0, 6.0),
        vec2(2.0, 0.0),
        vec2(0.5, 6.0),
    ]);
    let seqs = d.sequences();
    assert_eq!(seqs.len(), 2);

    // The tooth left of the peak starts at the flank corner's x.
    let inner = &seqs[0];
    assert_eq!(inner.x, 0.5);
    assert_eq!(inner.y, 6.0);
    assert_eq!(inner.width, 4.5);
    assert_eq!(inner.height, 6.0);
    assert_eq!(inner.elements.len(), 1);

    let outer = &seqs[1];
    assert_eq!(outer.y, 10.0);
    assert_eq!(outer.height, 10.0);
    assert_eq!(outer.elements.len(), 2);
    assert_eq!(outer.elements[1].kind, WedgeKind::Left);
}

#[test]
fn split_sequences_partition_height() {
    // Each emitted window spans from its own top join down to its bottom
    // join; the W teeth end at y=0 like the outer window.
    let d = helpers::assert_covers_outline(&[
        vec2(0.0, 10.0),
        vec2(10.0, 10.0),
        vec2(8.0, 0.0),
        vec2(5.0, 6.0),
        vec2(2.0, 0.0),
    ]);
    for ws in d.sequences() {
        let bottom = ws.y - ws.height;
        assert!((bottom - 0.0).abs() < 1e-5);
    }
}
