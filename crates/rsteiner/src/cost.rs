//! Cost evaluation for selections and edge lists.

use crate::geom::Edge;

/// `Σ x[i] · w[i]` over a selection vector.
///
/// Pre: `selection.len() == weights.len()`.
#[inline]
pub fn selection_cost(selection: &[bool], weights: &[f64]) -> f64 {
    debug_assert_eq!(selection.len(), weights.len());
    selection
        .iter()
        .zip(weights)
        .filter_map(|(&on, &w)| on.then_some(w))
        .sum()
}

/// Sum of stored edge weights.
#[inline]
pub fn edges_cost(edges: &[Edge]) -> f64 {
    edges.iter().map(|e| e.weight).sum()
}

/// Sum of Manhattan lengths, independent of stored weights.
#[inline]
pub fn manhattan_length(edges: &[Edge]) -> f64 {
    edges.iter().map(Edge::manhattan_length).sum()
}
