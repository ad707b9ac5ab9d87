//! Orthogonal grid graph derived from terminal coordinates.
//!
//! Purpose
//! - Turn a terminal set into the candidate edge universe searched by the
//!   exhaustive and reinforcement solvers: vertices at every intersection of
//!   the terminals' unique xs and ys, edges between axis-adjacent vertices.
//!
//! Ordering
//! - Horizontal edges come first, row by row (bottom to top), each row left to
//!   right. Vertical edges follow, column by column (left to right), each
//!   column bottom to top. Index-based bookkeeping (selections, the
//!   reinforcement pool) relies on this order being stable.
//!
//! Degenerate input
//! - If every terminal shares one x or one y the grid is a single line and
//!   its edges already form the optimal chain; see [`GridGraph::collinear_path`].

mod build;

pub use build::GridGraph;

#[cfg(test)]
mod tests;
