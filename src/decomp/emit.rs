// Copyright 2026 The wedgeseq authors
// License: MIT
//
// Wedge sequence emission: convert one closed window of the chain graph
// into its top-to-bottom trapezoid run.

use crate::chain::{ChainGraph, NodeIdx};
use crate::geom::Real;

use super::{WedgeElement, WedgeKind, WedgeSequence};

/// Walk both flanks of the window under `top` in lockstep, descending by
/// vertex height, and record one element per step. The left flank runs
/// backward (`prev`) from the top join, the right flank forward (`next`);
/// both end at the top's join successor.
pub(super) fn make_wedge_sequence(g: &ChainGraph, top: NodeIdx, ah: Real) -> WedgeSequence {
    let bot = g.prev_join(top);
    let right_end = g.next_join(top);
    let mut guard = 2 * g.len() + 4;

    let mut bb_xmin = g.x(bot);
    let mut p = top;
    while p != right_end && guard > 0 {
        if g.x(p) < bb_xmin {
            bb_xmin = g.x(p);
        }
        p = g.prev(p);
        guard -= 1;
    }
    let mut bb_xmax = g.x(right_end);
    let mut q = top;
    while q != right_end && guard > 0 {
        if g.x(q) > bb_xmax {
            bb_xmax = g.x(q);
        }
        q = g.next(q);
        guard -= 1;
    }

    let mut seq = WedgeSequence {
        x: bb_xmin,
        y: g.y(top),
        width: bb_xmax - bb_xmin,
        height: g.y(top) - g.y(bot),
        elements: Vec::new(),
    };

    let mut p = top;
    let mut q = top;
    let mut first = WedgeElement {
        kind: WedgeKind::Both,
        ..WedgeElement::default()
    };
    first.l_corr = g.x(p) - bb_xmin;
    if g.delta_y(p) == 0.0 {
        // Horizontal top: the right flank starts past the flat edge.
        q = g.next(q);
        first.r_corr = g.x(q) - bb_xmin;
    } else {
        first.r_corr = first.l_corr;
    }
    first.l_slope = (g.x(p) - g.x(g.prev(p))) / g.delta_y(g.prev(p));
    first.r_slope = -(g.x(q) - g.x(g.next(q))) / g.delta_y(q);
    seq.elements.push(first);

    let mut prev_y = g.y(top);
    q = g.next(q);
    p = g.prev(p);
    let mut guard = 2 * g.len() + 4;
    while p != q && guard > 0 {
        guard -= 1;
        if g.y(p) < g.y(q) - ah {
            // Right flank steps down alone.
            let mut el = WedgeElement {
                kind: WedgeKind::Right,
                ..WedgeElement::default()
            };
            set_last_height(&mut seq, prev_y - g.y(q));
            prev_y = g.y(q);
            if g.delta_y(q) == 0.0 {
                q = g.next(q);
                el.r_corr = g.x(q) - g.x(g.prev(q));
            }
            el.r_slope = -(g.x(q) - g.x(g.next(q))) / g.delta_y(q);
            q = g.next(q);
            seq.elements.push(el);
        } else if g.y(p) > g.y(q) + ah {
            // Left flank steps down alone.
            let mut el = WedgeElement {
                kind: WedgeKind::Left,
                ..WedgeElement::default()
            };
            set_last_height(&mut seq, prev_y - g.y(p));
            prev_y = g.y(p);
            if g.delta_y(g.prev(p)) == 0.0 {
                p = g.prev(p);
                el.l_corr = g.x(p) - g.x(g.next(p));
            }
            el.l_slope = (g.x(p) - g.x(g.prev(p))) / g.delta_y(g.prev(p));
            p = g.prev(p);
            seq.elements.push(el);
        } else {
            // Both flanks step together; the left vertex height wins.
            set_last_height(&mut seq, prev_y - g.y(p));
            let mut el = WedgeElement {
                kind: WedgeKind::Both,
                ..WedgeElement::default()
            };
            if g.delta_y(q) == 0.0 {
                q = g.next(q);
                if p == q {
                    // The bottom of the sequence is horizontal; the final
                    // element would have zero height, so drop it.
                    break;
                }
                el.r_corr = g.x(q) - g.x(g.prev(q));
            }
            prev_y = g.y(p);
            el.r_slope = -(g.x(q) - g.x(g.next(q))) / g.delta_y(q);
            q = g.next(q);
            if g.delta_y(g.prev(p)) == 0.0 {
                p = g.prev(p);
                el.l_corr = g.x(p) - g.x(g.next(p));
            }
            el.l_slope = (g.x(p) - g.x(g.prev(p))) / g.delta_y(g.prev(p));
            p = g.prev(p);
            seq.elements.push(el);
        }
    }

    if let Some(last) = seq.elements.last_mut() {
        last.height = prev_y - g.y(bot);
        last.last = true;
    }
    seq
}

fn set_last_height(seq: &mut WedgeSequence, h: Real) {
    if let Some(last) = seq.elements.last_mut() {
        last.height = h;
    }
}
