//! Cycle detection and enumeration on an adjacency matrix.

use std::collections::HashSet;

use nalgebra::DMatrix;
use petgraph::unionfind::UnionFind;

/// `true` iff the undirected graph in `matrix` contains a cycle.
///
/// Union-find over the upper triangle: an edge whose endpoints are already
/// joined closes a cycle. `O(V²)` matrix scan, independent of graph shape.
pub fn has_cycle(matrix: &DMatrix<f64>) -> bool {
    let n = matrix.nrows();
    let mut uf = UnionFind::<usize>::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if matrix[(i, j)] != 0.0 && !uf.union(i, j) {
                return true;
            }
        }
    }
    false
}

/// Up to `limit` distinct cycles, each as the vertex sequence of one walk
/// (closing vertex not repeated).
///
/// A cycle walked in reverse, or from another start vertex, is the same
/// cycle and is reported once. The walk enumerates simple paths, so its cost
/// grows exponentially with density; use [`has_cycle`] for a yes/no answer.
pub fn find_cycles(matrix: &DMatrix<f64>, limit: usize) -> Vec<Vec<usize>> {
    if limit == 0 {
        return Vec::new();
    }
    let mut search = CycleSearch::new(matrix, limit);
    for start in 0..search.adj.len() {
        if search.done() {
            break;
        }
        search.on_stack.iter_mut().for_each(|c| *c = false);
        search.path.clear();
        search.path_edges.clear();
        search.path.push(start);
        search.walk(start, start, None);
    }
    search.found
}

/// Walk state for one `find_cycles` call.
struct CycleSearch {
    /// Per vertex: `(neighbour, edge id)`.
    adj: Vec<Vec<(usize, usize)>>,
    on_stack: Vec<bool>,
    path: Vec<usize>,
    path_edges: Vec<usize>,
    found: Vec<Vec<usize>>,
    /// Sorted edge-id sets of recorded cycles.
    seen: HashSet<Vec<usize>>,
    limit: usize,
}

impl CycleSearch {
    fn new(matrix: &DMatrix<f64>, limit: usize) -> Self {
        let n = matrix.nrows();
        let mut adj = vec![Vec::new(); n];
        let mut edge_id = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if matrix[(i, j)] != 0.0 {
                    adj[i].push((j, edge_id));
                    adj[j].push((i, edge_id));
                    edge_id += 1;
                }
            }
        }
        Self {
            adj,
            on_stack: vec![false; n],
            path: Vec::new(),
            path_edges: Vec::new(),
            found: Vec::new(),
            seen: HashSet::new(),
            limit,
        }
    }

    #[inline]
    fn done(&self) -> bool {
        self.found.len() >= self.limit
    }

    fn walk(&mut self, v: usize, start: usize, came_by: Option<usize>) {
        if self.done() {
            return;
        }
        if v == start && self.path_edges.len() >= 2 {
            self.record();
            return;
        }
        // The start vertex stays off the stack so the walk can close on it.
        if v != start {
            self.on_stack[v] = true;
        }
        for k in 0..self.adj[v].len() {
            let (u, e) = self.adj[v][k];
            if Some(e) == came_by || self.on_stack[u] {
                continue;
            }
            self.path_edges.push(e);
            if u != start {
                self.path.push(u);
            }
            self.walk(u, start, Some(e));
            if u != start {
                self.path.pop();
            }
            self.path_edges.pop();
            self.on_stack[u] = false;
            if self.done() {
                return;
            }
        }
    }

    fn record(&mut self) {
        let mut key = self.path_edges.clone();
        key.sort_unstable();
        if self.seen.insert(key) {
            self.found.push(self.path.clone());
        }
    }
}
