// Copyright 2026 The wedgeseq authors
// License: MIT
//
// Backward search for the window enclosing a reflex join.
//
// A window is a maximal currently-open vertical slab bounded by a top join
// (carrying the window_top marker) and a bottom join, with the join links
// threading its two flanks. No window set is stored anywhere; membership is
// recovered on demand by walking the join ring backwards. The search is
// linear in the number of joins and runs once per reflex join, making the
// sweep O(J^2) in the worst case — fine at rasterization polygon sizes.

use crate::chain::{ChainGraph, NodeIdx};
use crate::geom::{edge_x_at, Real};

/// Yields the bottom join of each candidate window for `q`, scanning the
/// join ring backwards from `q`. Candidates are windows whose top lies
/// above `q.y` and whose bottom lies below it; the caller still has to
/// check which side of `q` they fall on.
///
/// Termination: after the first candidate, a scan reaching `q` or its join
/// partner has wrapped the ring and ends the search. A step budget bounds
/// the walk even on topology that violates the simple-polygon contract.
pub(crate) struct WindowCandidates<'a> {
    g: &'a ChainGraph,
    q: NodeIdx,
    q_partner: NodeIdx,
    q_y: Real,
    r: NodeIdx,
    budget: usize,
    first: bool,
    done: bool,
}

impl<'a> WindowCandidates<'a> {
    pub fn new(g: &'a ChainGraph, q: NodeIdx) -> Self {
        Self {
            g,
            q,
            q_partner: g.next_join(q),
            q_y: g.y(q),
            r: q,
            budget: g.len() * 2 + 4,
            first: true,
            done: false,
        }
    }

    fn step_back(&mut self) -> bool {
        if self.budget == 0 {
            self.done = true;
            return false;
        }
        self.budget -= 1;
        self.r = self.g.prev_join(self.r);
        true
    }
}

impl<'a> Iterator for WindowCandidates<'a> {
    type Item = NodeIdx;

    fn next(&mut self) -> Option<NodeIdx> {
        if self.done {
            return None;
        }
        // Scan backward for the next window top strictly above q.y.
        loop {
            if !self.step_back() {
                return None;
            }
            if !self.first && (self.r == self.q || self.r == self.q_partner) {
                self.done = true;
                return None;
            }
            let n = self.g.at(self.r);
            if n.window_top && n.y > self.q_y {
                break;
            }
        }
        // Scan backward for that window's bottom strictly below q.y. If the
        // scan wraps to q the candidate is still reported, matching the
        // sweep's use of the join ring.
        loop {
            if !self.step_back() {
                return None;
            }
            if !self.first && (self.r == self.q || self.r == self.q_partner) {
                break;
            }
            let n = self.g.at(self.r);
            if !n.peak && n.y < self.q_y {
                break;
            }
        }
        self.first = false;
        Some(self.r)
    }
}

/// Find the top join of the rightmost window left of, and vertically
/// spanning, the reflex join `q`: among all candidates, the one whose flank
/// x-intersection at `q.y` is the largest value still left of `q.x`.
///
/// Returns None only when the join topology is broken (non-simple or
/// counter-clockwise input with validation disabled).
pub(crate) fn find_enclosing_window(g: &ChainGraph, q: NodeIdx) -> Option<NodeIdx> {
    let q_x = g.x(q);
    let q_y = g.y(q);
    let mut best = None;
    let mut x_max = Real::NEG_INFINITY;

    for bottom in WindowCandidates::new(g, q) {
        let top = g.next_join(bottom);
        // Walk down the window flank to the edge spanning q.y.
        let mut p = g.prev(top);
        let mut guard = g.len();
        while g.y(p) > q_y {
            p = g.prev(p);
            guard -= 1;
            if guard == 0 {
                return None;
            }
        }
        let x = edge_x_at(g.x(p), g.y(p), g.x(g.next(p)), g.delta_y(p), q_y);
        if x < q_x && x >= x_max {
            x_max = x;
            best = Some(top);
        }
    }
    best
}
