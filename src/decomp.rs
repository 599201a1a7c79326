// Copyright 2026 The wedgeseq authors
// License: MIT
//
// The decomposition pipeline: chain building, geometry normalization, join
// classification, x-order scheduling and the window sweep. Each stage runs
// over the chain graph in `crate::chain`; the sweep emits wedge sequences
// through `emit`.
//
// The pipeline processes one polygon per call. The polygon outline becomes a
// circular chain whose local extrema (joins) are threaded into a ring, the
// joins are sorted by x, and a left-to-right sweep splits the chain at every
// reflex join until only simple windows remain, emitting each window as a
// wedge sequence when its right end is reached.

use glam::Vec2;
use log::{debug, trace};

use crate::chain::{ChainGraph, NodeIdx, Turn, INVALID};
use crate::error::Error;
use crate::geom::{self, corner_cross, Real};
use crate::window;

mod emit;

/// Tuning knobs for the decomposer.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Corners whose |cross product| is at most this are treated as
    /// collinear and removed. Zero removes exactly-straight corners only.
    pub flatness: Real,
    /// Edges with |delta y| at most this (but not zero) are snapped to
    /// horizontal by moving their lower endpoint.
    pub almost_horizontal: Real,
    /// Reject invalid input up front instead of running the sweep on it.
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flatness: 0.0,
            almost_horizontal: 0.0,
            validate: true,
        }
    }
}

/// Which flank of the window steps down in this element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WedgeKind {
    Left,
    Right,
    #[default]
    Both,
}

/// One trapezoid of a wedge sequence.
///
/// A consumer walks elements top to bottom, maintaining a left and right
/// edge position. At each element the flank named by `kind` jumps by its
/// correction and takes a new slope; fields for the untouched flank are zero
/// and the previous slope carries over. Slopes are dx per unit of descending
/// y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WedgeElement {
    pub kind: WedgeKind,
    /// Vertical extent of this element.
    pub height: Real,
    /// Horizontal jump of the left edge at the top of this element. For the
    /// first element of a sequence, offset from the bounding-box left.
    pub l_corr: Real,
    pub r_corr: Real,
    pub l_slope: Real,
    pub r_slope: Real,
    /// True on the final element of its sequence.
    pub last: bool,
}

/// One window of the polygon: a run of trapezoids sharing a vertical span,
/// listed top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WedgeSequence {
    /// Bounding-box left edge.
    pub x: Real,
    /// Top of the sequence (y grows upward).
    pub y: Real,
    /// Bounding-box width.
    pub width: Real,
    /// Total vertical extent, top join to bottom join.
    pub height: Real,
    pub elements: Vec<WedgeElement>,
}

/// Result of a successful decomposition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decomposition {
    /// The polygon's windows in emission order.
    Sequences(Vec<WedgeSequence>),
    /// Every vertex was collinear within the flatness tolerance; there is
    /// nothing to rasterize. Not an error.
    Degenerate,
}

impl Decomposition {
    /// The emitted sequences; empty for a degenerate polygon.
    pub fn sequences(&self) -> &[WedgeSequence] {
        match self {
            Decomposition::Sequences(s) => s,
            Decomposition::Degenerate => &[],
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Decomposition::Degenerate)
    }
}

/// Decompose a simple clockwise polygon (y-axis up) into wedge sequences
/// using the default [`Config`].
pub fn decompose(points: &[Vec2]) -> Result<Decomposition, Error> {
    let mut d = Decomposer::new();
    d.decompose(points)
}

/// Reusable decomposer. Holds the chain arena across calls so repeated
/// decompositions of similarly sized polygons do not reallocate.
#[derive(Debug, Default)]
pub struct Decomposer {
    config: Config,
    graph: ChainGraph,
    sequences: Vec<WedgeSequence>,
}

impl Decomposer {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            graph: ChainGraph::new(),
            sequences: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the full pipeline on one polygon outline.
    pub fn decompose(&mut self, points: &[Vec2]) -> Result<Decomposition, Error> {
        self.graph.clear();
        self.sequences.clear();

        if points.len() < 3 {
            return Err(Error::TooFewVertices(points.len()));
        }
        if self.config.validate {
            validate(points)?;
        }

        let start = self.build_chain(points);
        self.snap_horizontal(start);
        let start = match self.remove_collinear(start) {
            Some(s) => s,
            None => {
                debug!("polygon is fully collinear; nothing to emit");
                return Ok(Decomposition::Degenerate);
            }
        };
        let (first_peak, num_joins) = self.classify_joins(start)?;
        debug!(
            "classified {} joins over {} surviving vertices",
            num_joins,
            self.graph.len()
        );
        let order = self.schedule(first_peak, num_joins)?;
        self.sweep(&order)?;
        debug!("emitted {} wedge sequences", self.sequences.len());
        Ok(Decomposition::Sequences(std::mem::take(&mut self.sequences)))
    }

    /// Build the circular chain from the outline, one node per vertex.
    fn build_chain(&mut self, points: &[Vec2]) -> NodeIdx {
        let g = &mut self.graph;
        let first = g.alloc(points[0].x, points[0].y);
        let mut last = first;
        for p in &points[1..] {
            let node = g.alloc(p.x, p.y);
            g.link(last, node);
            g.refresh_delta(last);
            last = node;
        }
        g.link(last, first);
        g.refresh_delta(last);
        first
    }

    /// Snap almost-horizontal edges flat by moving their far endpoint to the
    /// near endpoint's height.
    fn snap_horizontal(&mut self, c: NodeIdx) {
        let ah = self.config.almost_horizontal;
        let g = &mut self.graph;
        let mut q = c;
        let mut r = g.next(c);
        loop {
            if g.delta_y(q).abs() <= ah && g.delta_y(q) != 0.0 {
                let qy = g.y(q);
                g.at_mut(r).y = qy;
                g.refresh_delta(r);
                g.at_mut(q).delta_y = 0.0;
            }
            q = r;
            r = g.next(r);
            if q == c {
                break;
            }
        }
    }

    /// Splice out every vertex collinear within the flatness tolerance and
    /// tag the survivors convex or reflex. Returns a surviving start node,
    /// or None when the whole polygon collapses.
    fn remove_collinear(&mut self, mut c: NodeIdx) -> Option<NodeIdx> {
        let flatness = self.config.flatness;
        let g = &mut self.graph;

        // Find a corner that will survive, so the splice pass below can use
        // it as its fixed point.
        let mut p = g.prev(c);
        let mut q = c;
        let mut r = g.next(c);
        loop {
            let cross = corner_cross(g.pos(p), g.pos(q), g.pos(r));
            if cross.abs() > flatness {
                c = q;
                break;
            }
            q = r;
            if q == c {
                return None;
            }
            p = g.next(p);
            r = g.next(r);
        }

        let mut removed = 0usize;
        let mut p = g.prev(c);
        let mut q = c;
        let mut r = g.next(c);
        loop {
            let cross = corner_cross(g.pos(p), g.pos(q), g.pos(r));
            if cross.abs() <= flatness {
                // p is always q's chain predecessor here: splicing keeps the
                // survivor linked to the next candidate.
                g.splice_out(q);
                removed += 1;
            } else {
                g.at_mut(q).turn = if cross > 0.0 {
                    Turn::Reflex
                } else {
                    Turn::Convex
                };
                p = q;
            }
            q = r;
            r = g.next(r);
            if q == c {
                break;
            }
        }
        if removed > 0 {
            debug!("removed {} collinear vertices", removed);
        }
        Some(c)
    }

    /// Walk the chain once, splitting it into alternating down- and
    /// up-chains, threading the join ring and tagging peaks, cusps and
    /// down-to-right direction. Returns the first peak and the join count.
    fn classify_joins(&mut self, start: NodeIdx) -> Result<(NodeIdx, usize), Error> {
        let g = &mut self.graph;
        let mut steps = 0usize;
        let max_steps = 4 * g.len() + 8;
        macro_rules! advance {
            ($q:ident) => {{
                $q = g.next($q);
                steps += 1;
                if steps > max_steps {
                    return Err(Error::BrokenTopology);
                }
            }};
        }

        // Find the first rising edge, then the top of its up-chain.
        let mut q = start;
        while g.delta_y(q) <= 0.0 {
            advance!(q);
        }
        advance!(q);
        while g.delta_y(q) >= 0.0 {
            advance!(q);
        }
        // A horizontal edge at the top of a chain belongs to the down-chain.
        if g.delta_y(g.prev(q)) == 0.0 && g.at(q).turn != Turn::Reflex {
            q = g.prev(q);
        }

        let keepq = q;
        let mut num_joins = 0usize;
        loop {
            // Down-chain: find its bottom and its x-maximal node.
            let p = q;
            let mut qxmax = q;
            advance!(q);
            while g.delta_y(q) <= 0.0 {
                if g.x(q) >= g.x(qxmax) {
                    qxmax = q;
                }
                advance!(q);
            }
            if g.delta_y(g.prev(q)) == 0.0 {
                if g.at(q).turn == Turn::Reflex {
                    q = g.prev(q);
                }
            } else if g.x(q) >= g.x(qxmax) {
                qxmax = q;
            }

            if qxmax != p && qxmax != q {
                // Interior x-maximum: a down cusp splits the chain in two.
                g.link_join(p, qxmax);
                g.link_join(qxmax, q);
                g.at_mut(p).down_to_right = true;
                num_joins += 1;
                g.at_mut(qxmax).turn = Turn::DownCusp;
            } else {
                g.link_join(p, q);
                if qxmax == q {
                    g.at_mut(p).down_to_right = true;
                    if g.at(q).turn == Turn::Reflex {
                        g.at_mut(q).down_to_right = true;
                    } else {
                        g.at_mut(q).turn = Turn::DownCusp;
                    }
                } else if g.at(p).turn != Turn::Reflex {
                    // qxmax == p: the chain runs down-to-left from its top.
                    g.at_mut(p).turn = Turn::DownCusp;
                }
            }
            num_joins += 1;
            g.at_mut(p).peak = true;

            // Up-chain: find its top and its x-minimal node.
            num_joins += 1;
            let p = q;
            let mut qxmin = p;
            advance!(q);
            while g.delta_y(q) >= 0.0 {
                if g.x(q) < g.x(qxmin) {
                    qxmin = q;
                }
                advance!(q);
            }
            if g.delta_y(g.prev(q)) == 0.0 {
                if g.at(q).turn != Turn::Reflex {
                    q = g.prev(q);
                }
            } else if g.x(q) < g.x(qxmin) {
                qxmin = q;
            }

            if qxmin != p && qxmin != q {
                g.link_join(p, qxmin);
                g.link_join(qxmin, q);
                g.at_mut(qxmin).turn = Turn::UpCusp;
                num_joins += 1;
            } else {
                g.link_join(p, q);
            }

            if q == keepq {
                break;
            }
        }
        Ok((keepq, num_joins))
    }

    /// Collect the join ring and order it left to right, ties top first.
    fn schedule(&self, first_peak: NodeIdx, num_joins: usize) -> Result<Vec<NodeIdx>, Error> {
        let g = &self.graph;
        let mut joins = Vec::with_capacity(num_joins);
        let mut q = first_peak;
        for _ in 0..num_joins {
            joins.push(q);
            q = g.next_join(q);
            if q == INVALID {
                return Err(Error::BrokenTopology);
            }
        }
        joins.sort_by(|&a, &b| {
            g.x(a)
                .total_cmp(&g.x(b))
                .then_with(|| g.y(b).total_cmp(&g.y(a)))
        });
        Ok(joins)
    }

    /// Process the joins in x-order, splitting the chain at reflex joins and
    /// emitting a wedge sequence whenever a window closes.
    fn sweep(&mut self, joins: &[NodeIdx]) -> Result<(), Error> {
        for &q in joins {
            let node = self.graph.at(q);
            let turn = node.turn;
            let peak = node.peak;
            let dtr = node.down_to_right;
            trace!(
                "join at ({}, {}): {:?}, peak={}, down_to_right={}",
                node.x,
                node.y,
                turn,
                peak,
                dtr
            );

            // The top of every up-chain left of the sweep front bounds an
            // open window.
            if peak {
                self.graph.at_mut(q).window_top = true;
            } else {
                let top = self.graph.next_join(q);
                self.graph.at_mut(top).window_top = true;
            }

            match turn {
                Turn::Reflex => self.process_reflex(q, peak, dtr)?,
                Turn::DownCusp => {
                    // The cusp closes the window it bottoms out.
                    let top = if peak { q } else { self.graph.prev_join(q) };
                    self.emit(top);
                }
                Turn::UpCusp => self.graph.unlink_join(q),
                Turn::Convex => {
                    if peak {
                        if !dtr {
                            self.emit(q);
                        }
                    } else if dtr {
                        let top = self.graph.next_join(q);
                        self.emit(top);
                    }
                }
            }
        }
        Ok(())
    }

    /// A reflex join splits its enclosing window into two. Locate the
    /// window, align the join into its left flank, then relink the chain and
    /// join ring into two disjoint polygons.
    fn process_reflex(&mut self, q: NodeIdx, peak: bool, dtr: bool) -> Result<(), Error> {
        let top = match (peak, dtr) {
            // Left of an up-chain: the window is the one this join's own
            // chains open, two joins ahead in the ring.
            (true, false) => self.graph.next_join(self.graph.next_join(q)),
            // Right of a down-chain: one join back.
            (false, true) => self.graph.prev_join(q),
            // Otherwise search the ring for the rightmost window left of
            // and vertically spanning the join.
            _ => window::find_enclosing_window(&self.graph, q).ok_or(Error::BrokenTopology)?,
        };
        let bot = self.graph.prev_join(top);

        let (p, p_in, p_out) = self.align_to_window(top, bot, q)?;
        if peak {
            self.split_peak(q, top, bot, p, p_in, p_out);
            if !dtr {
                self.emit(p_in);
            }
        } else {
            self.split_valley(q, top, bot, p, p_in, p_out);
            if dtr {
                self.emit(top);
            }
        }
        Ok(())
    }

    /// Find where `q` meets the window's left flank and make sure a node
    /// sits there: `p_in` ends the upper part of the flank, `p_out` (edge
    /// case only) starts the lower part. Returns (flank node above or at
    /// q.y, p_in, p_out).
    fn align_to_window(
        &mut self,
        top: NodeIdx,
        bot: NodeIdx,
        q: NodeIdx,
    ) -> Result<(NodeIdx, NodeIdx, Option<NodeIdx>), Error> {
        let ah = self.config.almost_horizontal;
        let g = &mut self.graph;
        let q_y = g.y(q);

        let mut p = g.prev(top);
        let mut guard = g.len();
        while g.y(p) > q_y + ah {
            p = g.prev(p);
            guard -= 1;
            if guard == 0 {
                return Err(Error::BrokenTopology);
            }
        }

        if (g.y(p) - q_y).abs() > ah {
            // q lines up with the interior of the edge below p: synthesize
            // an in/out node pair at the intersection.
            let x = geom::edge_x_at(g.x(p), g.y(p), g.x(g.next(p)), g.delta_y(p), q_y);
            let p_in = g.synth(x, q_y);
            let p_out = g.synth(x, q_y);

            let pn = g.next(p);
            g.at_mut(p_out).next = pn;
            g.at_mut(pn).prev = p_out;
            g.at_mut(p_out).delta_y = g.y(pn) - q_y;

            g.at_mut(p_out).next_join = top;
            g.at_mut(p_in).prev_join = bot;
            g.at_mut(top).prev_join = p_out;
            g.at_mut(p).next = p_in;
            g.at_mut(p_in).prev = p;
            g.at_mut(p).delta_y = q_y - g.y(p);
            Ok((p, p_in, Some(p_out)))
        } else {
            // q lines up with the vertex p itself. Reuse the node above p if
            // it already sits at the same height.
            let p_in = if g.delta_y(g.prev(p)) == 0.0 {
                g.prev(p)
            } else {
                let p_in = g.synth(g.x(p), g.y(p));
                let pp = g.prev(p);
                g.at_mut(p_in).prev = pp;
                g.at_mut(pp).next = p_in;
                g.at_mut(p).prev = p_in;
                p_in
            };
            g.at_mut(p_in).prev_join = bot;
            Ok((p, p_in, None))
        }
    }

    /// Split at a reflex peak: the window's upper-left flank joins the peak
    /// from the left, the chain below the peak continues as a new window.
    fn split_peak(
        &mut self,
        q: NodeIdx,
        top: NodeIdx,
        bot: NodeIdx,
        p: NodeIdx,
        p_in: NodeIdx,
        p_out: Option<NodeIdx>,
    ) {
        let g = &mut self.graph;

        let q_in = if g.delta_y(g.prev(q)) != 0.0 {
            let q_in = g.synth(g.x(q), g.y(q));
            let qp = g.prev(q);
            g.at_mut(q_in).prev = qp;
            g.at_mut(qp).next = q_in;
            q_in
        } else {
            g.prev(q)
        };

        g.at_mut(p_in).next = q;
        g.at_mut(q).prev = p_in;
        if g.prev_join(bot) == q {
            g.at_mut(bot).prev_join = p_in;
        }

        let q_next_join = g.next_join(q);
        let q_prev_join = g.prev_join(q);
        g.at_mut(p_in).next_join = q_next_join;
        g.at_mut(p_in).window_top = true;
        g.at_mut(q_prev_join).next_join = top;
        g.at_mut(q_next_join).prev_join = p_in;

        g.at_mut(top).prev_join = q_prev_join;
        g.at_mut(bot).next_join = p_in;

        match p_out {
            Some(p_out) => {
                // Peak lines up with a window edge.
                g.at_mut(p_out).prev = q_in;
                g.at_mut(q_in).next = p_out;
            }
            None => {
                // Peak lines up with a window vertex.
                g.at_mut(p).prev = q_in;
                g.at_mut(q_in).next = p;
                g.refresh_delta(q);
                let qip = g.prev(q_in);
                g.at_mut(qip).delta_y = g.y(q_in) - g.y(qip);
            }
        }
    }

    /// Split at a reflex valley: the join's down-chain bottom hands its
    /// window over to the flank, the chain right of the valley starts fresh.
    fn split_valley(
        &mut self,
        q: NodeIdx,
        top: NodeIdx,
        bot: NodeIdx,
        p: NodeIdx,
        p_in: NodeIdx,
        p_out: Option<NodeIdx>,
    ) {
        let g = &mut self.graph;

        let q_out = if g.delta_y(q) != 0.0 {
            let q_out = g.synth(g.x(q), g.y(q));
            let qn = g.next(q);
            g.at_mut(q_out).next = qn;
            g.at_mut(qn).prev = q_out;
            q_out
        } else {
            g.next(q)
        };

        let q_next_join = g.next_join(q);
        g.at_mut(q_next_join).prev_join = bot;
        g.at_mut(bot).next_join = q_next_join;
        g.at_mut(q_out).prev = p_in;
        g.at_mut(p_in).next = q_out;
        g.at_mut(q).delta_y = 0.0;

        match p_out {
            Some(p_out) => {
                // Valley lines up with a window edge.
                if g.next_join(top) == q {
                    g.at_mut(top).next_join = p_out;
                } else {
                    let qpj = g.prev_join(q);
                    g.at_mut(qpj).next_join = p_out;
                }
                g.at_mut(p_out).prev = q;
                g.at_mut(q).next = p_out;
                let qpj = g.prev_join(q);
                g.at_mut(p_out).prev_join = qpj;
                g.at_mut(top).prev_join = p_out;
                g.at_mut(p_out).next_join = top;
            }
            None => {
                // Valley lines up with a window vertex.
                if g.next_join(top) == q {
                    g.at_mut(top).next_join = p;
                } else {
                    let qpj = g.prev_join(q);
                    g.at_mut(qpj).next_join = p;
                }
                g.at_mut(q).next = p;
                g.at_mut(p).prev = q;
                let qpj = g.prev_join(q);
                g.at_mut(p).prev_join = qpj;
                g.at_mut(top).prev_join = p;
                g.at_mut(p).next_join = top;
                let qp = g.prev(q);
                g.at_mut(qp).delta_y = g.y(q) - g.y(qp);
            }
        }
        let qon = g.next(q_out);
        g.at_mut(q_out).delta_y = g.y(qon) - g.y(q_out);
    }

    fn emit(&mut self, top: NodeIdx) {
        let seq = emit::make_wedge_sequence(&self.graph, top, self.config.almost_horizontal);
        trace!(
            "window closed at top ({}, {}): {} elements",
            seq.x,
            seq.y,
            seq.elements.len()
        );
        self.sequences.push(seq);
    }
}

/// Check the input contract: at least 3 finite vertices, no consecutive
/// duplicates, clockwise winding, no properly crossing edges. Quadratic in
/// the vertex count, which is fine at rasterization polygon sizes.
fn validate(points: &[Vec2]) -> Result<(), Error> {
    for (i, p) in points.iter().enumerate() {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(Error::NonFiniteVertex(i));
        }
    }
    let n = points.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if points[i] == points[j] {
            return Err(Error::DuplicateVertex(i, j));
        }
    }
    // Zero area passes: a fully collinear outline is reported as degenerate
    // later, not rejected here.
    if geom::polygon_signed_area(points) > 0.0 {
        return Err(Error::NotClockwise);
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (a, b) = (points[i], points[(i + 1) % n]);
            let (c, d) = (points[j], points[(j + 1) % n]);
            if geom::segments_properly_cross(a, b, c, d) {
                return Err(Error::SelfIntersecting(i, j));
            }
        }
    }
    Ok(())
}
