// Copyright 2026 The wedgeseq authors
// License: MIT
//
// The chain graph: one growable arena of nodes carrying two independent
// link relations over the same node set.
//
//   - chain links (`prev`/`next`): the polygon outline. Circular before any
//     split; after a split two independent circular chains exist.
//   - join links (`prev_join`/`next_join`): the join graph threaded over
//     chain endpoints and cusp nodes, driving the sweep.
//
// All pointers are u32 indices into a Vec arena (INVALID = u32::MAX), so
// backward and forward traversal never alias and nodes are only ever added,
// never freed, during a run.

use crate::geom::Real;
use glam::Vec2;

pub const INVALID: u32 = u32::MAX;

/// Index into ChainGraph::nodes.
pub type NodeIdx = u32;

/// How the polygon turns at a vertex, or the cusp role the classifier
/// assigned to it. Cusp assignment replaces the turn outright, so a cusp
/// node is never also reflex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Turn {
    /// Negative cross product at a clockwise vertex.
    #[default]
    Convex,
    /// Positive cross product: the corner points into the polygon.
    Reflex,
    /// x-minimal node interior to an up-chain.
    UpCusp,
    /// x-maximal node interior to a down-chain.
    DownCusp,
}

#[derive(Clone, Debug)]
pub struct ChainNode {
    pub x: Real,
    pub y: Real,
    /// Signed vertical extent to the chain successor: `next.y - y`. Kept
    /// consistent with the chain links after every structural edit.
    pub delta_y: Real,
    pub prev: NodeIdx,
    pub next: NodeIdx,
    pub prev_join: NodeIdx,
    pub next_join: NodeIdx,
    pub turn: Turn,
    /// Top join of a down-chain.
    pub peak: bool,
    /// Direction tag: the x-maximal end of the join's down-chain is its bottom.
    pub down_to_right: bool,
    /// Marks the top join of a currently-open window during the sweep.
    pub window_top: bool,
    /// Created mid-sweep for vertical alignment; never removed.
    pub synthesized: bool,
}

impl Default for ChainNode {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            delta_y: 0.0,
            prev: INVALID,
            next: INVALID,
            prev_join: INVALID,
            next_join: INVALID,
            turn: Turn::Convex,
            peak: false,
            down_to_right: false,
            window_top: false,
            synthesized: false,
        }
    }
}

/// Node arena plus the edit operations the pipeline mutates it with.
#[derive(Debug, Default)]
pub struct ChainGraph {
    pub nodes: Vec<ChainNode>,
}

impl ChainGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a node at (x, y) with no links.
    pub fn alloc(&mut self, x: Real, y: Real) -> NodeIdx {
        let idx = self.nodes.len() as NodeIdx;
        self.nodes.push(ChainNode {
            x,
            y,
            ..ChainNode::default()
        });
        idx
    }

    /// Allocate a sweep-synthesized node at (x, y), delta_y = 0.
    pub fn synth(&mut self, x: Real, y: Real) -> NodeIdx {
        let idx = self.alloc(x, y);
        self.nodes[idx as usize].synthesized = true;
        idx
    }

    // ──────────────── Navigation accessors ────────────────

    #[inline]
    pub fn at(&self, i: NodeIdx) -> &ChainNode {
        &self.nodes[i as usize]
    }

    #[inline]
    pub fn at_mut(&mut self, i: NodeIdx) -> &mut ChainNode {
        &mut self.nodes[i as usize]
    }

    #[inline]
    pub fn x(&self, i: NodeIdx) -> Real {
        self.nodes[i as usize].x
    }

    #[inline]
    pub fn y(&self, i: NodeIdx) -> Real {
        self.nodes[i as usize].y
    }

    #[inline]
    pub fn delta_y(&self, i: NodeIdx) -> Real {
        self.nodes[i as usize].delta_y
    }

    #[inline]
    pub fn pos(&self, i: NodeIdx) -> Vec2 {
        let n = &self.nodes[i as usize];
        Vec2::new(n.x, n.y)
    }

    #[inline]
    pub fn next(&self, i: NodeIdx) -> NodeIdx {
        self.nodes[i as usize].next
    }

    #[inline]
    pub fn prev(&self, i: NodeIdx) -> NodeIdx {
        self.nodes[i as usize].prev
    }

    #[inline]
    pub fn next_join(&self, i: NodeIdx) -> NodeIdx {
        self.nodes[i as usize].next_join
    }

    #[inline]
    pub fn prev_join(&self, i: NodeIdx) -> NodeIdx {
        self.nodes[i as usize].prev_join
    }

    // ──────────────── Edit operations ────────────────

    /// Make `b` the chain successor of `a`. Does not touch delta_y.
    #[inline]
    pub fn link(&mut self, a: NodeIdx, b: NodeIdx) {
        debug_assert_ne!(a, INVALID);
        debug_assert_ne!(b, INVALID);
        self.nodes[a as usize].next = b;
        self.nodes[b as usize].prev = a;
    }

    /// Recompute `delta_y` of `i` from the current chain links.
    #[inline]
    pub fn refresh_delta(&mut self, i: NodeIdx) {
        let next = self.next(i);
        debug_assert_ne!(next, INVALID);
        self.nodes[i as usize].delta_y = self.y(next) - self.y(i);
    }

    /// Remove `q` from its chain, merging its two incident edges. `q` keeps
    /// its stale links; the surviving predecessor's delta_y is refreshed.
    pub fn splice_out(&mut self, q: NodeIdx) {
        let p = self.prev(q);
        let r = self.next(q);
        debug_assert_ne!(p, q);
        debug_assert_ne!(r, q);
        self.link(p, r);
        self.refresh_delta(p);
    }

    /// Make `b` the join successor of `a`.
    #[inline]
    pub fn link_join(&mut self, a: NodeIdx, b: NodeIdx) {
        debug_assert_ne!(a, INVALID);
        debug_assert_ne!(b, INVALID);
        self.nodes[a as usize].next_join = b;
        self.nodes[b as usize].prev_join = a;
    }

    /// Remove `q` from the join ring, connecting its neighbors directly.
    pub fn unlink_join(&mut self, q: NodeIdx) {
        let p = self.prev_join(q);
        let n = self.next_join(q);
        debug_assert_ne!(p, INVALID);
        debug_assert_ne!(n, INVALID);
        self.nodes[n as usize].prev_join = p;
        self.nodes[p as usize].next_join = n;
    }

    // ──────────────── Invariant helpers (used by tests) ────────────────

    /// Walk the chain forward from `start` and collect the cycle. Panics if
    /// the chain does not close within the arena size (broken topology).
    pub fn chain_cycle(&self, start: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut i = start;
        loop {
            out.push(i);
            i = self.next(i);
            assert!(out.len() <= self.nodes.len(), "chain does not close");
            if i == start {
                return out;
            }
        }
    }

    /// Check `prev`/`next` agreement and delta_y consistency around the
    /// cycle containing `start`.
    pub fn assert_chain_consistent(&self, start: NodeIdx) {
        for &i in &self.chain_cycle(start) {
            let n = self.next(i);
            assert_eq!(self.prev(n), i, "prev/next disagree at {}", i);
            let dy = self.y(n) - self.y(i);
            assert!(
                (self.delta_y(i) - dy).abs() < 1e-5,
                "delta_y stale at {}: stored {}, actual {}",
                i,
                self.delta_y(i),
                dy
            );
        }
    }

    /// Walk the join ring forward from `start` and collect the cycle.
    pub fn join_ring(&self, start: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut i = start;
        loop {
            out.push(i);
            i = self.next_join(i);
            assert!(out.len() <= self.nodes.len(), "join ring does not close");
            if i == start {
                return out;
            }
        }
    }
}
