//! Rectilinear Steiner-tree solvers.
//!
//! Purpose
//! - Three interchangeable strategies behind one entry point:
//!   - `greedy`: Kruskal over terminal pairs, rectilinearized and simplified.
//!   - `exhaustive`: include/exclude branch-and-bound over grid edges.
//!   - `reinforce`: generational random sampling over a reinforced edge pool.
//! - Shared result, error and configuration types.
//!
//! Contract
//! - `Ok(None)`: fewer than two distinct terminals, or no valid tree found.
//! - `Ok(Some(tree))`: connected rectilinear edges touching every terminal;
//!   acyclic for every strategy.
//! - `Err(_)`: an invariant broke (non-finite input, empty grid, sampling
//!   never produced a valid trial). Callers should treat these as bugs or bad
//!   input, not as "no solution".
//!
//! Randomness is an explicit `&mut dyn RngCore`; nothing here touches global state.

pub mod exhaustive;
pub mod greedy;
pub mod prune;
pub mod reinforce;
pub mod simplify;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::analyzer::unique_points;
use crate::cost::edges_cost;
use crate::geom::{Edge, Point};

pub use exhaustive::{solve_exhaustive, ExhaustiveCfg, ExhaustiveSolver};
pub use greedy::{solve_greedy, GreedyCfg, GreedySolver};
pub use prune::{prune_edges, prune_selection};
pub use reinforce::{solve_reinforce, ReinforceCfg, ReinforceSolver};
pub use simplify::simplify;

/// A solver's answer: rectilinear edges plus their total weight.
#[derive(Clone, Debug, PartialEq)]
pub struct SteinerTree {
    edges: Vec<Edge>,
    cost: f64,
}

impl SteinerTree {
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        let cost = edges_cost(&edges);
        Self { edges, cost }
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    /// Sum of edge weights (Manhattan lengths for every built-in solver).
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Unique endpoints, first-seen order.
    pub fn points(&self) -> Vec<Point> {
        unique_points(&self.edges)
    }
}

/// Invariant violations surfaced to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    NonFiniteTerminal { index: usize },
    EmptyGrid { terminals: usize },
    TrialsExhausted { generation: usize, attempts: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteTerminal { index } => {
                write!(f, "terminal #{index} has a non-finite coordinate")
            }
            Self::EmptyGrid { terminals } => write!(
                f,
                "grid over {terminals} non-collinear terminals has no candidate edges"
            ),
            Self::TrialsExhausted {
                generation,
                attempts,
            } => write!(
                f,
                "no valid random trial after {attempts} attempts in generation {generation}"
            ),
        }
    }
}

impl std::error::Error for SolveError {}

/// Strategy selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Greedy,
    Exhaustive,
    Reinforcement,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Greedy,
        Strategy::Exhaustive,
        Strategy::Reinforcement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Exhaustive => "exhaustive",
            Strategy::Reinforcement => "reinforcement",
        }
    }

    /// Boxed solver configured from `cfg`.
    pub fn solver(self, cfg: &SolverCfg) -> Box<dyn SteinerSolver> {
        match self {
            Strategy::Greedy => Box::new(GreedySolver { cfg: cfg.greedy }),
            Strategy::Exhaustive => Box::new(ExhaustiveSolver {
                cfg: cfg.exhaustive,
            }),
            Strategy::Reinforcement => Box::new(ReinforceSolver { cfg: cfg.reinforce }),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStrategyError(pub String);

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy {:?} (expected greedy, exhaustive or reinforcement)",
            self.0
        )
    }
}

impl std::error::Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" | "kruskal" => Ok(Strategy::Greedy),
            "exhaustive" | "brute-force" | "bruteforce" => Ok(Strategy::Exhaustive),
            "reinforcement" | "reinforce" | "ant-colony" | "ants" => Ok(Strategy::Reinforcement),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Per-strategy knobs bundled for callers that switch strategies at runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolverCfg {
    pub greedy: GreedyCfg,
    pub exhaustive: ExhaustiveCfg,
    pub reinforce: ReinforceCfg,
}

/// Common solver surface.
pub trait SteinerSolver {
    fn name(&self) -> &'static str;

    /// Build a tree over `terminals`. See the module docs for the contract.
    fn solve(
        &self,
        terminals: &[Point],
        rng: &mut dyn RngCore,
    ) -> Result<Option<SteinerTree>, SolveError>;
}

/// Run `strategy` on `terminals`.
pub fn solve(
    strategy: Strategy,
    terminals: &[Point],
    cfg: &SolverCfg,
    rng: &mut dyn RngCore,
) -> Result<Option<SteinerTree>, SolveError> {
    strategy.solver(cfg).solve(terminals, rng)
}

/// Reject non-finite input and drop repeated terminals (first occurrence wins).
///
/// Returns `None` when fewer than two distinct terminals remain.
pub(crate) fn distinct_terminals(terminals: &[Point]) -> Result<Option<Vec<Point>>, SolveError> {
    if let Some(index) = terminals.iter().position(|p| !p.is_finite()) {
        return Err(SolveError::NonFiniteTerminal { index });
    }
    let mut seen = HashSet::with_capacity(terminals.len());
    let distinct: Vec<Point> = terminals
        .iter()
        .copied()
        .filter(|p| seen.insert(*p))
        .collect();
    Ok((distinct.len() >= 2).then_some(distinct))
}

#[cfg(test)]
mod tests;
