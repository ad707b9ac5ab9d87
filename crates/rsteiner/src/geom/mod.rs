//! Planar primitives: terminal points and weighted segments.
//!
//! Purpose
//! - Provide a single concrete point type with exact value equality, and a
//!   weighted, unordered edge built on top of it.
//! - Distances are plain functions so solvers can pick a metric per call.
//! - `rand`: reproducible random terminal sets for benches, tests and the CLI.
//!
//! Conventions
//! - Equality is exact (`==` on coordinates), no tolerance. Grid vertices are
//!   built from the terminals' own coordinates, so exactness is what we want.
//! - `-0.0` is normalized to `0.0` at construction so hashing agrees with `==`.

mod edge;
mod point;
pub mod rand;

pub use edge::{Edge, Metric};
pub use point::{euclidean, manhattan, Coord2, Point};
