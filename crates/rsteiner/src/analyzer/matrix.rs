use std::collections::{HashMap, VecDeque};

use nalgebra::DMatrix;

use crate::geom::{Edge, Point};

/// Symmetric weighted adjacency matrix over the points touched by some edges.
///
/// `matrix[(i, j)] = weight` when an edge joins `points[i]` and `points[j]`,
/// `0` otherwise. Zero-weight edges are stored as `f64::MIN_POSITIVE` so that
/// presence stays distinguishable from absence.
#[derive(Clone, Debug)]
pub struct AdjacencyMatrix {
    points: Vec<Point>,
    index: HashMap<Point, usize>,
    matrix: DMatrix<f64>,
}

impl AdjacencyMatrix {
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge> + Clone) -> Self {
        let mut points = Vec::new();
        let mut index = HashMap::new();
        for e in edges.clone() {
            for p in [e.a, e.b] {
                index.entry(p).or_insert_with(|| {
                    points.push(p);
                    points.len() - 1
                });
            }
        }
        let n = points.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        for e in edges {
            let (i, j) = (index[&e.a], index[&e.b]);
            if i == j {
                continue;
            }
            let w = if e.weight == 0.0 {
                f64::MIN_POSITIVE
            } else {
                e.weight
            };
            matrix[(i, j)] = w;
            matrix[(j, i)] = w;
        }
        Self {
            points,
            index,
            matrix,
        }
    }

    /// Matrix over the edges of `candidates` picked by `selection`.
    pub fn from_selection(selection: &[bool], candidates: &[Edge]) -> Self {
        let picked: Vec<&Edge> = candidates
            .iter()
            .zip(selection)
            .filter_map(|(e, &on)| on.then_some(e))
            .collect();
        Self::from_edges(picked.iter().copied())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        self.index.get(&p).copied()
    }

    /// Number of non-zero entries in row `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.matrix.row(i).iter().filter(|&&w| w != 0.0).count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        (0..self.len()).map(|i| self.degree(i)).sum::<usize>() / 2
    }

    /// Breadth-first traversal from `root`; `visited[i]` marks reached vertices.
    pub fn reachable_from(&self, root: usize) -> Vec<bool> {
        reachable(&self.matrix, root)
    }
}

/// Breadth-first reachability over a raw adjacency matrix.
pub(crate) fn reachable(matrix: &DMatrix<f64>, root: usize) -> Vec<bool> {
    let n = matrix.nrows();
    let mut visited = vec![false; n];
    if root >= n {
        return visited;
    }
    visited[root] = true;
    let mut queue = VecDeque::from([root]);
    while let Some(v) = queue.pop_front() {
        for u in 0..n {
            if u != v && matrix[(v, u)] != 0.0 && !visited[u] {
                visited[u] = true;
                queue.push_back(u);
            }
        }
    }
    visited
}
