// Copyright 2026 The wedgeseq authors
// License: MIT

use thiserror::Error;

/// Input and topology failures surfaced by the decomposer.
///
/// A fully collinear polygon is not an error: it yields
/// [`Decomposition::Degenerate`](crate::Decomposition::Degenerate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),

    #[error("vertices {0} and {1} are identical consecutive points")]
    DuplicateVertex(usize, usize),

    #[error("polygon winds counter-clockwise; clockwise order is required")]
    NotClockwise,

    #[error("polygon is not simple: edges starting at vertices {0} and {1} cross")]
    SelfIntersecting(usize, usize),

    /// The sweep lost track of its enclosing window. Only reachable when
    /// validation is disabled and the input violates the clockwise/simple
    /// contract.
    #[error("sweep topology is inconsistent; input was not a simple clockwise polygon")]
    BrokenTopology,
}
