use crate::geom::{Edge, Point};

/// Candidate edge universe over the terminals' coordinate grid.
#[derive(Clone, Debug)]
pub struct GridGraph {
    /// Unique sorted x coordinates.
    pub xs: Vec<f64>,
    /// Unique sorted y coordinates.
    pub ys: Vec<f64>,
    /// Horizontals (row-major) then verticals (column-major).
    pub edges: Vec<Edge>,
}

impl GridGraph {
    /// Build the grid for `terminals`. Returns `None` for an empty slice.
    pub fn build(terminals: &[Point]) -> Option<Self> {
        if terminals.is_empty() {
            return None;
        }
        let xs = sorted_unique(terminals.iter().map(|p| p.x()));
        let ys = sorted_unique(terminals.iter().map(|p| p.y()));
        let w = xs.len() - 1;
        let h = ys.len() - 1;

        let mut edges = Vec::with_capacity(Self::expected_edge_count(w, h));
        for &y in &ys {
            for j in 0..w {
                edges.push(Edge::new(
                    Point::new(xs[j], y),
                    Point::new(xs[j + 1], y),
                    xs[j + 1] - xs[j],
                ));
            }
        }
        for &x in &xs {
            for i in 0..h {
                edges.push(Edge::new(
                    Point::new(x, ys[i]),
                    Point::new(x, ys[i + 1]),
                    ys[i + 1] - ys[i],
                ));
            }
        }
        debug_assert_eq!(edges.len(), Self::expected_edge_count(w, h));
        Some(Self { xs, ys, edges })
    }

    /// Edge count of a `w × h` cell grid: the sum of vertex degrees, halved.
    ///
    /// Corners have degree 2, non-corner boundary vertices 3, interior 4:
    /// `(4·2 + 2·3·(h−1) + 2·3·(w−1) + 4·(h−1)·(w−1)) / 2 = 2wh + w + h`.
    /// The closed form also holds for a single row or column.
    #[inline]
    pub fn expected_edge_count(w: usize, h: usize) -> usize {
        2 * w * h + w + h
    }

    /// Number of grid cells along x.
    #[inline]
    pub fn width(&self) -> usize {
        self.xs.len() - 1
    }

    /// Number of grid cells along y.
    #[inline]
    pub fn height(&self) -> usize {
        self.ys.len() - 1
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All terminals on one vertical or horizontal line (or a single point).
    #[inline]
    pub fn is_collinear(&self) -> bool {
        self.xs.len() == 1 || self.ys.len() == 1
    }

    /// For collinear input, the chain of successive grid edges spanning it.
    pub fn collinear_path(&self) -> Option<Vec<Edge>> {
        if self.is_collinear() {
            Some(self.edges.clone())
        } else {
            None
        }
    }

    pub fn weights(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.weight).collect()
    }

    /// Index of the edge joining `a` and `b` (either orientation).
    pub fn edge_index(&self, a: Point, b: Point) -> Option<usize> {
        let probe = Edge::new(a, b, 0.0);
        self.edges.iter().position(|e| e.same_endpoints(&probe))
    }

    /// Edges picked by a selection vector (parallel to `self.edges`).
    pub fn edges_of(&self, selection: &[bool]) -> Vec<Edge> {
        self.edges
            .iter()
            .zip(selection)
            .filter_map(|(e, &on)| on.then_some(*e))
            .collect()
    }
}

fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}
