// Copyright 2026 The wedgeseq authors
// License: MIT

//! Decompose simple clockwise polygons into x-ordered wedge sequences.
//!
//! A wedge sequence is a vertical run of trapezoids (wedges) sharing one
//! window of the polygon: a span with a single top and bottom vertex and
//! monotone left and right flanks. Scan converters consume each sequence
//! top to bottom with two interpolated edge positions and no per-scanline
//! search, which is the point of the exercise.
//!
//! Coordinates are x-right, y-up; outlines wind clockwise.
//!
//! ```
//! use glam::vec2;
//!
//! let square = [
//!     vec2(0.0, 0.0),
//!     vec2(0.0, 10.0),
//!     vec2(10.0, 10.0),
//!     vec2(10.0, 0.0),
//! ];
//! let result = wedgeseq::decompose(&square).unwrap();
//! assert_eq!(result.sequences().len(), 1);
//! ```
//!
//! [`Decomposer`] keeps its working arena across calls for repeated use;
//! [`decompose`] is the one-shot convenience entry point.

pub mod chain;
mod decomp;
mod error;
pub mod geom;
mod window;

pub use decomp::{
    decompose, Config, Decomposer, Decomposition, WedgeElement, WedgeKind, WedgeSequence,
};
pub use error::Error;
pub use geom::Real;
