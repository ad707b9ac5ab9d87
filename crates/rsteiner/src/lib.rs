//! Rectilinear Steiner-tree approximation.
//!
//! Given terminal points in the plane, build a low-cost tree of axis-aligned
//! segments connecting them. Three strategies share one surface
//! ([`solvers::solve`]):
//! - greedy: Kruskal over terminal pairs, L-shaped, simplified;
//! - exhaustive: branch-and-bound over the terminals' coordinate grid;
//! - reinforcement: generational sampling over a reinforced edge pool.
//!
//! Layout (leaf first)
//! - `geom`: `Point`, `Edge`, distances, random terminal sets.
//! - `grid`: candidate edge universe over the unique coordinates.
//! - `analyzer`: adjacency matrix, spanning check, cycle search.
//! - `cost`: weight sums.
//! - `solvers`: the three strategies, pruning and simplification.
//!
//! API Policy
//! - Project-internal; `api` re-exports the pieces the CLI and benches use.

pub mod analyzer;
pub mod api;
pub mod cost;
pub mod geom;
pub mod grid;
pub mod solvers;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::rand::{draw_terminals, ReplayToken, TerminalCfg, TerminalCount};
    pub use crate::geom::{Edge, Metric, Point};
    pub use crate::grid::GridGraph;
    pub use crate::solvers::{
        solve, ExhaustiveCfg, GreedyCfg, ReinforceCfg, SolveError, SolverCfg, SteinerSolver,
        SteinerTree, Strategy,
    };
}
