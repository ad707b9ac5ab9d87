//! Greedy solver: Kruskal over terminal pairs, then rectilinearize.
//!
//! Steps
//! 1. All unordered pairs of distinct terminals, stable-sorted by distance.
//! 2. Accept pairs in order into a terminal adjacency matrix, rejecting any
//!    pair that closes a cycle (checked with `analyzer::has_cycle`).
//! 3. Stop once every terminal has an edge and the accepted set is connected.
//! 4. Replace each accepted pair `(p, q)` by an L through `(p.x, q.y)`.
//! 5. `simplify` the L-segments to a rectilinear tree.

use nalgebra::DMatrix;
use rand::RngCore;

use super::simplify::simplify;
use super::{distinct_terminals, SolveError, SteinerSolver, SteinerTree};
use crate::analyzer::{has_cycle, reachable};
use crate::geom::{Edge, Metric, Point};
use crate::grid::GridGraph;

/// Greedy solver configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyCfg {
    /// Distance used to order terminal pairs. The output is always measured
    /// in Manhattan length.
    pub metric: Metric,
}

/// [`SteinerSolver`] wrapper around [`solve_greedy`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySolver {
    pub cfg: GreedyCfg,
}

impl SteinerSolver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(
        &self,
        terminals: &[Point],
        _rng: &mut dyn RngCore,
    ) -> Result<Option<SteinerTree>, SolveError> {
        solve_greedy(terminals, self.cfg)
    }
}

/// Greedy rectilinear tree over `terminals`.
pub fn solve_greedy(
    terminals: &[Point],
    cfg: GreedyCfg,
) -> Result<Option<SteinerTree>, SolveError> {
    let Some(terms) = distinct_terminals(terminals)? else {
        return Ok(None);
    };
    if let Some(path) = GridGraph::build(&terms).and_then(|g| g.collinear_path()) {
        return Ok(Some(SteinerTree::from_edges(path)));
    }

    let accepted = spanning_pairs(&terms, cfg.metric);
    tracing::debug!(
        terminals = terms.len(),
        pairs = accepted.len(),
        "greedy spanning pairs accepted"
    );
    let segments: Vec<Edge> = accepted
        .iter()
        .flat_map(|&(i, j)| rectilinearize(terms[i], terms[j]))
        .collect();
    let edges = simplify(&segments, &terms);
    debug_assert!(crate::analyzer::check_edges(&edges, &terms).is_valid());
    Ok(Some(SteinerTree::from_edges(edges)))
}

/// Kruskal over all terminal pairs; returns accepted `(i, j)` index pairs.
fn spanning_pairs(terms: &[Point], metric: Metric) -> Vec<(usize, usize)> {
    let n = terms.len();
    let mut pairs = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j, metric.distance(terms[i], terms[j])));
        }
    }
    // `sort_by` is stable: ties keep enumeration order.
    pairs.sort_by(|l, r| l.2.total_cmp(&r.2));

    let mut matrix = DMatrix::<f64>::zeros(n, n);
    let mut degree = vec![0usize; n];
    let mut accepted = Vec::with_capacity(n - 1);
    for (i, j, w) in pairs {
        let w = if w == 0.0 { f64::MIN_POSITIVE } else { w };
        matrix[(i, j)] = w;
        matrix[(j, i)] = w;
        if has_cycle(&matrix) {
            matrix[(i, j)] = 0.0;
            matrix[(j, i)] = 0.0;
            continue;
        }
        accepted.push((i, j));
        degree[i] += 1;
        degree[j] += 1;
        if degree.iter().all(|&d| d > 0) && reachable(&matrix, i).iter().all(|&v| v) {
            break;
        }
    }
    accepted
}

/// L-shaped replacement of `p → q` through the corner `(p.x, q.y)`.
/// Zero-length legs are omitted.
pub fn rectilinearize(p: Point, q: Point) -> Vec<Edge> {
    let corner = Point::new(p.x(), q.y());
    [Edge::manhattan(p, corner), Edge::manhattan(corner, q)]
        .into_iter()
        .filter(|e| !e.is_degenerate())
        .collect()
}
