//! Curated internal API (UNSTABLE).
//!
//! Important
//! - Not a public API. A convenience surface for the CLI, benches and
//!   integration tests. Breaking changes are allowed.

// Primitives
pub use crate::geom::rand::{draw_terminals, ReplayToken, TerminalCfg, TerminalCount};
pub use crate::geom::{euclidean, manhattan, Coord2, Edge, Metric, Point};
// Grid and analysis
pub use crate::analyzer::{
    check_edges, check_spanning_tree, find_cycles, has_cycle, is_connected_edges,
    is_spanning_tree, unique_points, AdjacencyMatrix, Verdict,
};
pub use crate::cost::{edges_cost, manhattan_length, selection_cost};
pub use crate::grid::GridGraph;
// Solvers
pub use crate::solvers::{
    prune_edges, prune_selection, simplify, solve, solve_exhaustive, solve_greedy,
    solve_reinforce, ExhaustiveCfg, GreedyCfg, ParseStrategyError, ReinforceCfg, SolveError,
    SolverCfg, SteinerSolver, SteinerTree, Strategy,
};
