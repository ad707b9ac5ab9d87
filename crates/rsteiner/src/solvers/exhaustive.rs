//! Exhaustive solver: include/exclude branch-and-bound over grid edges.
//!
//! Every candidate edge, in grid order, is branched on twice: left out, then
//! taken. A branch is abandoned as soon as it holds more than
//! `max_edges_per_terminal × |terminals|` edges. Complete assignments are
//! kept only if `analyzer::is_spanning_tree` accepts them; the cheaper valid
//! child wins at each node (the "taken" child on ties).
//!
//! Exponential in the grid's edge count; meant for a handful of terminals.

use rand::RngCore;

use super::{distinct_terminals, SolveError, SteinerSolver, SteinerTree};
use crate::analyzer::is_spanning_tree;
use crate::cost::selection_cost;
use crate::geom::{Edge, Point};
use crate::grid::GridGraph;

/// Exhaustive search configuration.
#[derive(Clone, Copy, Debug)]
pub struct ExhaustiveCfg {
    /// Branches holding more than `max_edges_per_terminal × |terminals|` edges
    /// are dropped. Heuristic cutoff; it does not certify optimality.
    pub max_edges_per_terminal: usize,
}

impl Default for ExhaustiveCfg {
    fn default() -> Self {
        Self {
            max_edges_per_terminal: 2,
        }
    }
}

/// [`SteinerSolver`] wrapper around [`solve_exhaustive`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustiveSolver {
    pub cfg: ExhaustiveCfg,
}

impl SteinerSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(
        &self,
        terminals: &[Point],
        _rng: &mut dyn RngCore,
    ) -> Result<Option<SteinerTree>, SolveError> {
        solve_exhaustive(terminals, self.cfg)
    }
}

/// Search statistics, reported through `tracing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub pruned: u64,
    pub valid: u64,
}

/// Cheapest valid grid tree over `terminals` within the edge budget.
pub fn solve_exhaustive(
    terminals: &[Point],
    cfg: ExhaustiveCfg,
) -> Result<Option<SteinerTree>, SolveError> {
    let Some(terms) = distinct_terminals(terminals)? else {
        return Ok(None);
    };
    let Some(grid) = GridGraph::build(&terms) else {
        return Ok(None);
    };
    if let Some(path) = grid.collinear_path() {
        return Ok(Some(SteinerTree::from_edges(path)));
    }
    if grid.edges.is_empty() {
        return Err(SolveError::EmptyGrid {
            terminals: terms.len(),
        });
    }

    let max_included = cfg.max_edges_per_terminal.saturating_mul(terms.len());
    let mut bnb = BranchAndBound::new(&grid.edges, &terms, max_included);
    let best = bnb.search(0);
    tracing::debug!(
        edges = grid.edge_count(),
        max_included,
        nodes = bnb.stats.nodes,
        leaves = bnb.stats.leaves,
        pruned = bnb.stats.pruned,
        valid = bnb.stats.valid,
        cost = best.as_ref().map(|b| b.cost),
        "exhaustive search done"
    );
    Ok(best.map(|b| SteinerTree::from_edges(grid.edges_of(&b.selection))))
}

/// A complete valid assignment and its cost.
#[derive(Clone, Debug)]
struct Leaf {
    selection: Vec<bool>,
    cost: f64,
}

/// Search state: the current partial assignment is set and unset in place
/// around each recursive call; valid leaves are cloned out.
struct BranchAndBound<'a> {
    edges: &'a [Edge],
    weights: Vec<f64>,
    terminals: &'a [Point],
    max_included: usize,
    selection: Vec<bool>,
    included: usize,
    stats: SearchStats,
}

impl<'a> BranchAndBound<'a> {
    fn new(edges: &'a [Edge], terminals: &'a [Point], max_included: usize) -> Self {
        Self {
            edges,
            weights: edges.iter().map(|e| e.weight).collect(),
            terminals,
            max_included,
            selection: vec![false; edges.len()],
            included: 0,
            stats: SearchStats::default(),
        }
    }

    fn search(&mut self, pos: usize) -> Option<Leaf> {
        self.stats.nodes += 1;
        if self.included > self.max_included {
            self.stats.pruned += 1;
            return None;
        }
        if pos == self.edges.len() {
            self.stats.leaves += 1;
            if !is_spanning_tree(&self.selection, self.edges, self.terminals) {
                return None;
            }
            self.stats.valid += 1;
            return Some(Leaf {
                selection: self.selection.clone(),
                cost: selection_cost(&self.selection, &self.weights),
            });
        }

        let without = self.search(pos + 1);

        self.selection[pos] = true;
        self.included += 1;
        let with = self.search(pos + 1);
        self.selection[pos] = false;
        self.included -= 1;

        match (without, with) {
            (Some(a), Some(b)) => Some(if a.cost < b.cost { a } else { b }),
            (a, b) => a.or(b),
        }
    }
}
