//! Removal of dangling non-terminal branches.
//!
//! A selected edge is dangling when one of its endpoints is not a terminal
//! and has no other selected edge. Each pass removes every dangling edge;
//! passes repeat until none is left, so the result has only terminals as
//! leaves. Running it again on its own output changes nothing.

use std::collections::{HashMap, HashSet};

use crate::geom::{Edge, Point};

/// Prune a selection in place. Returns how many edges were dropped.
///
/// Pre: `selection.len() == candidates.len()`.
pub fn prune_selection(
    selection: &mut [bool],
    candidates: &[Edge],
    terminals: &[Point],
) -> usize {
    debug_assert_eq!(selection.len(), candidates.len());
    let terminals: HashSet<Point> = terminals.iter().copied().collect();
    let mut removed = 0;
    loop {
        let live = candidates
            .iter()
            .enumerate()
            .filter(|&(i, _)| selection[i]);
        let dangling = dangling_edges(live, &terminals);
        if dangling.is_empty() {
            return removed;
        }
        removed += dangling.len();
        for i in dangling {
            selection[i] = false;
        }
    }
}

/// Same as [`prune_selection`] on an owned edge list.
pub fn prune_edges(mut edges: Vec<Edge>, terminals: &[Point]) -> Vec<Edge> {
    let terminals: HashSet<Point> = terminals.iter().copied().collect();
    loop {
        let dangling = dangling_edges(edges.iter().enumerate(), &terminals);
        if dangling.is_empty() {
            return edges;
        }
        let drop: HashSet<usize> = dangling.into_iter().collect();
        edges = edges
            .into_iter()
            .enumerate()
            .filter_map(|(i, e)| (!drop.contains(&i)).then_some(e))
            .collect();
    }
}

/// Ids of edges touching a non-terminal vertex of degree one.
fn dangling_edges<'a>(
    live: impl Iterator<Item = (usize, &'a Edge)> + Clone,
    terminals: &HashSet<Point>,
) -> Vec<usize> {
    let mut degree: HashMap<Point, usize> = HashMap::new();
    for (_, e) in live.clone() {
        *degree.entry(e.a).or_default() += 1;
        *degree.entry(e.b).or_default() += 1;
    }
    let is_leaf = |p: &Point| degree[p] == 1 && !terminals.contains(p);
    live.filter(|(_, e)| is_leaf(&e.a) || is_leaf(&e.b))
        .map(|(i, _)| i)
        .collect()
}
