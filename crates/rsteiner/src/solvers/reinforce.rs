//! Reinforcement solver: generational sampling over a reinforced edge pool.
//!
//! Model
//! - The pool is a list of grid-edge indices; an index's multiplicity is its
//!   draw weight. It starts with every index exactly once.
//! - A trial draws `k` distinct edges from a copy of the pool (taking an
//!   index removes all of its copies) and is retried from scratch until the
//!   selection is a tree reaching every terminal. Dangling non-terminal
//!   branches are then pruned.
//! - Each generation keeps its cheapest trial and inserts one more copy of
//!   each of its edges into the pool at random positions. There is no decay.
//! - The cheapest generation winner overall is returned.

use rand::{Rng, RngCore};

use super::prune::prune_selection;
use super::{distinct_terminals, SolveError, SteinerSolver, SteinerTree};
use crate::analyzer::is_spanning_tree;
use crate::cost::selection_cost;
use crate::geom::Point;
use crate::grid::GridGraph;

/// Reinforcement solver configuration.
#[derive(Clone, Copy, Debug)]
pub struct ReinforceCfg {
    pub generations: usize,
    pub trials_per_generation: usize,
    /// Lower bound on edges drawn per trial. Default: `|terminals| - 1`.
    pub min_edges: Option<usize>,
    /// Upper bound on edges drawn per trial. Default: `|grid edges| / 2`.
    pub max_edges: Option<usize>,
    /// Attempts allowed for a single trial before giving up.
    pub max_attempts: usize,
}

impl Default for ReinforceCfg {
    fn default() -> Self {
        Self {
            generations: 30,
            trials_per_generation: 2,
            min_edges: None,
            max_edges: None,
            max_attempts: 1_000_000,
        }
    }
}

/// [`SteinerSolver`] wrapper around [`solve_reinforce`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ReinforceSolver {
    pub cfg: ReinforceCfg,
}

impl SteinerSolver for ReinforceSolver {
    fn name(&self) -> &'static str {
        "reinforcement"
    }

    fn solve(
        &self,
        terminals: &[Point],
        rng: &mut dyn RngCore,
    ) -> Result<Option<SteinerTree>, SolveError> {
        solve_reinforce(terminals, self.cfg, rng)
    }
}

/// Best pruned tree found over `cfg.generations` generations.
pub fn solve_reinforce<R: Rng + ?Sized>(
    terminals: &[Point],
    cfg: ReinforceCfg,
    rng: &mut R,
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

    let mut colony = Colony::new(&grid, &terms, cfg);
    let mut best: Option<Winner> = None;
    for generation in 0..cfg.generations {
        let Some(winner) = colony.generation(generation, rng)? else {
            break;
        };
        tracing::trace!(
            generation,
            cost = winner.cost,
            pool = colony.pool.len(),
            "generation winner"
        );
        if best.as_ref().is_none_or(|b| winner.cost < b.cost) {
            best = Some(winner);
        }
    }
    tracing::debug!(
        generations = cfg.generations,
        pool = colony.pool.len(),
        attempts = colony.attempts,
        cost = best.as_ref().map(|b| b.cost),
        "reinforcement done"
    );
    Ok(best.map(|b| SteinerTree::from_edges(grid.edges_of(&b.selection))))
}

#[derive(Clone, Debug)]
struct Winner {
    selection: Vec<bool>,
    cost: f64,
}

/// Pool and bookkeeping for one solve.
struct Colony<'a> {
    grid: &'a GridGraph,
    terminals: &'a [Point],
    weights: Vec<f64>,
    pool: Vec<usize>,
    draw_lo: usize,
    draw_hi: usize,
    trials: usize,
    max_attempts: usize,
    /// Total sampling attempts across all trials.
    attempts: u64,
}

impl<'a> Colony<'a> {
    fn new(grid: &'a GridGraph, terminals: &'a [Point], cfg: ReinforceCfg) -> Self {
        let n = grid.edge_count();
        let (draw_lo, draw_hi) = draw_range(&cfg, terminals.len(), n);
        Self {
            grid,
            terminals,
            weights: grid.weights(),
            pool: (0..n).collect(),
            draw_lo,
            draw_hi,
            trials: cfg.trials_per_generation,
            max_attempts: cfg.max_attempts.max(1),
            attempts: 0,
        }
    }

    /// Run one generation; reinforce the pool with its winner.
    fn generation<R: Rng + ?Sized>(
        &mut self,
        generation: usize,
        rng: &mut R,
    ) -> Result<Option<Winner>, SolveError> {
        let mut best: Option<Winner> = None;
        for _ in 0..self.trials {
            let mut selection = self.sample_valid(generation, rng)?;
            prune_selection(&mut selection, &self.grid.edges, self.terminals);
            let cost = selection_cost(&selection, &self.weights);
            if best.as_ref().is_none_or(|b| cost < b.cost) {
                best = Some(Winner { selection, cost });
            }
        }
        if let Some(w) = &best {
            reinforce(&mut self.pool, &w.selection, rng);
        }
        Ok(best)
    }

    /// Draw trials until one is a spanning tree.
    fn sample_valid<R: Rng + ?Sized>(
        &mut self,
        generation: usize,
        rng: &mut R,
    ) -> Result<Vec<bool>, SolveError> {
        for attempt in 1..=self.max_attempts {
            self.attempts += 1;
            let selection = self.sample(rng);
            if is_spanning_tree(&selection, &self.grid.edges, self.terminals) {
                if attempt > 10_000 {
                    tracing::warn!(generation, attempt, "valid trial needed many attempts");
                }
                return Ok(selection);
            }
        }
        Err(SolveError::TrialsExhausted {
            generation,
            attempts: self.max_attempts,
        })
    }

    /// One random selection drawn from a fresh copy of the pool.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<bool> {
        let mut selection = vec![false; self.grid.edge_count()];
        let mut working = self.pool.clone();
        let mut remaining = rng.gen_range(self.draw_lo..=self.draw_hi);
        while remaining > 0 && !working.is_empty() {
            let picked = working[rng.gen_range(0..working.len())];
            working.retain(|&i| i != picked);
            selection[picked] = true;
            remaining -= 1;
        }
        selection
    }
}

/// Inclusive `[lo, hi]` range for the number of edges drawn per trial.
fn draw_range(cfg: &ReinforceCfg, terminals: usize, edges: usize) -> (usize, usize) {
    let lo = cfg
        .min_edges
        .unwrap_or(terminals.saturating_sub(1))
        .clamp(1, edges.max(1));
    let hi = cfg.max_edges.unwrap_or(edges / 2).min(edges).max(lo);
    (lo, hi)
}

/// Insert one extra copy of each selected index at a random position.
fn reinforce<R: Rng + ?Sized>(pool: &mut Vec<usize>, selection: &[bool], rng: &mut R) {
    for (i, &on) in selection.iter().enumerate() {
        if on {
            let at = rng.gen_range(0..=pool.len());
            pool.insert(at, i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{check_edges, Verdict};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let terms = [p(0.0, 0.0), p(2.0, 1.0), p(1.0, 2.0)];
        let cfg = ReinforceCfg::default();
        let a = solve_reinforce(&terms, cfg, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = solve_reinforce(&terms, cfg, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        let tree = a.unwrap();
        assert_eq!(check_edges(tree.edges(), &terms), Verdict::Valid);
        assert!(tree.cost() >= 4.0);
    }

    #[test]
    fn pool_grows_by_winner_size_each_generation() {
        let terms = [p(0.0, 0.0), p(1.0, 1.0)];
        let grid = GridGraph::build(&terms).unwrap();
        let mut colony = Colony::new(&grid, &terms, ReinforceCfg::default());
        let mut rng = StdRng::seed_from_u64(3);
        let before = colony.pool.len();
        let w = colony.generation(0, &mut rng).unwrap().unwrap();
        let picked = w.selection.iter().filter(|&&s| s).count();
        assert_eq!(picked, 2);
        assert_eq!(w.cost, 2.0);
        assert_eq!(colony.pool.len(), before + picked);
        for (i, &on) in w.selection.iter().enumerate() {
            let copies = colony.pool.iter().filter(|&&k| k == i).count();
            assert_eq!(copies, if on { 2 } else { 1 });
        }
    }

    #[test]
    fn trial_draws_are_distinct_edges_within_range() {
        let terms = [p(0.0, 0.0), p(2.0, 1.0), p(1.0, 2.0)];
        let grid = GridGraph::build(&terms).unwrap();
        let mut colony = Colony::new(&grid, &terms, ReinforceCfg::default());
        // Heavily reinforce one edge; it still counts once per trial.
        colony.pool.extend(std::iter::repeat(0).take(100));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let sel = colony.sample(&mut rng);
            let k = sel.iter().filter(|&&s| s).count();
            assert!((2..=6).contains(&k), "drew {k} edges");
        }
    }

    #[test]
    fn reinforced_copies_can_land_in_every_slot() {
        let mut front = false;
        let mut back = false;
        for seed in 0..64 {
            let mut pool = vec![0];
            reinforce(&mut pool, &[false, true], &mut StdRng::seed_from_u64(seed));
            match pool.as_slice() {
                [1, 0] => front = true,
                [0, 1] => back = true,
                other => panic!("unexpected pool {other:?}"),
            }
        }
        assert!(front && back);
    }

    #[test]
    fn draw_range_defaults_and_overrides() {
        let cfg = ReinforceCfg::default();
        assert_eq!(draw_range(&cfg, 3, 12), (2, 6));
        // More terminals than half the grid: range collapses to the lower bound.
        assert_eq!(draw_range(&cfg, 4, 4), (3, 3));
        let custom = ReinforceCfg {
            min_edges: Some(4),
            max_edges: Some(100),
            ..cfg
        };
        assert_eq!(draw_range(&custom, 3, 12), (4, 12));
    }

    #[test]
    fn exhausted_attempts_surface_as_error() {
        let terms = [p(0.0, 0.0), p(2.0, 1.0), p(1.0, 2.0)];
        // One edge per trial can never reach three terminals.
        let cfg = ReinforceCfg {
            min_edges: Some(1),
            max_edges: Some(1),
            max_attempts: 50,
            ..ReinforceCfg::default()
        };
        let err = solve_reinforce(&terms, cfg, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(
            err,
            SolveError::TrialsExhausted {
                generation: 0,
                attempts: 50
            }
        );
    }
}
