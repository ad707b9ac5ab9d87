//! Connectivity and cycle analysis for candidate edge subsets.
//!
//! Purpose
//! - Decide whether a selection of edges is a tree that reaches every
//!   terminal. All three solvers route their candidates through here.
//!
//! Model
//! - Selected edges induce an adjacency matrix over the unique points they
//!   touch (first-seen order). The matrix is rebuilt per evaluation; it is
//!   small (a few dozen vertices at most for the grids we search).
//! - Connectivity: traversal from vertex 0.
//! - Cycle presence: union-find over the matrix entries.
//! - Cycle listing: per-start-vertex depth-first walk that never re-enters a
//!   vertex already on the stack and never re-uses the edge it just came along.
//!
//! Code cross-refs: `grid::GridGraph`, `solvers::{greedy,exhaustive,reinforce}`.

mod cycles;
mod matrix;

pub use cycles::{find_cycles, has_cycle};
pub use matrix::AdjacencyMatrix;
pub(crate) use matrix::reachable;

use std::collections::{HashMap, HashSet, VecDeque};

use crate::geom::{Edge, Point};

/// Outcome of [`check_spanning_tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Empty,
    Disconnected,
    MissingTerminal,
    Cyclic,
}

impl Verdict {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Spanning-and-acyclic test for a selection over `candidates`.
///
/// Pre: `selection.len() == candidates.len()`.
/// Post: `true` iff the selected edges form one connected, acyclic component
/// that contains every terminal.
#[inline]
pub fn is_spanning_tree(selection: &[bool], candidates: &[Edge], terminals: &[Point]) -> bool {
    check_spanning_tree(selection, candidates, terminals).is_valid()
}

/// Like [`is_spanning_tree`], reporting the first failed condition.
pub fn check_spanning_tree(
    selection: &[bool],
    candidates: &[Edge],
    terminals: &[Point],
) -> Verdict {
    debug_assert_eq!(selection.len(), candidates.len());
    let adj = AdjacencyMatrix::from_selection(selection, candidates);
    check_matrix(&adj, terminals)
}

/// Same test on an explicit edge list.
pub fn check_edges(edges: &[Edge], terminals: &[Point]) -> Verdict {
    check_matrix(&AdjacencyMatrix::from_edges(edges), terminals)
}

fn check_matrix(adj: &AdjacencyMatrix, terminals: &[Point]) -> Verdict {
    if adj.is_empty() {
        return Verdict::Empty;
    }
    let visited = adj.reachable_from(0);
    if visited.iter().any(|&v| !v) {
        return Verdict::Disconnected;
    }
    // Every touched vertex is reached, so a terminal is reached iff it is touched.
    if terminals.iter().any(|t| adj.index_of(*t).is_none()) {
        return Verdict::MissingTerminal;
    }
    if has_cycle(adj.matrix()) {
        return Verdict::Cyclic;
    }
    Verdict::Valid
}

/// Independent BFS over an edge list: `true` iff all endpoints form one component.
///
/// An empty list counts as connected.
pub fn is_connected_edges(edges: &[Edge]) -> bool {
    let mut nbrs: HashMap<Point, Vec<Point>> = HashMap::new();
    for e in edges {
        nbrs.entry(e.a).or_default().push(e.b);
        nbrs.entry(e.b).or_default().push(e.a);
    }
    let Some(root) = edges.first().map(|e| e.a) else {
        return true;
    };
    let mut seen: HashSet<Point> = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(p) = queue.pop_front() {
        for &q in &nbrs[&p] {
            if seen.insert(q) {
                queue.push_back(q);
            }
        }
    }
    seen.len() == nbrs.len()
}

/// Unique endpoints of `edges`, in first-seen order.
pub fn unique_points(edges: &[Edge]) -> Vec<Point> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for e in edges {
        for p in [e.a, e.b] {
            if seen.insert(p) {
                out.push(p);
            }
        }
    }
    out
}
