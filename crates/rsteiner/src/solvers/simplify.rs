//! Fixed-point cleanup of rectilinear segment sets.
//!
//! Input: axis-aligned segments (possibly overlapping, touching, crossing or
//! forming loops) that together connect the terminals.
//! Output: a tree of axis-aligned segments over the same terminals, no longer
//! than the input's union.
//!
//! One round:
//! 1. planarize: drop zero-length pieces, merge overlapping pieces on each
//!    line, split at terminals, junctions and crossings;
//! 2. keep a minimum spanning forest of the pieces (breaks loops the
//!    L-shapes may close);
//! 3. prune dangling non-terminal branches;
//! 4. fuse collinear pieces meeting at a non-terminal vertex of degree two.
//!
//! Rounds repeat until the (canonically ordered) output stops changing.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use petgraph::unionfind::UnionFind;

use super::prune::prune_edges;
use crate::geom::{Edge, Point};

/// Safety cap; in practice the second round is already a no-op.
const MAX_ROUNDS: usize = 16;

/// Simplify `segments` to a rectilinear tree over `terminals`.
///
/// Pre: every segment is axis-aligned.
pub fn simplify(segments: &[Edge], terminals: &[Point]) -> Vec<Edge> {
    debug_assert!(segments.iter().all(Edge::is_axis_aligned));
    let mut current = canonical(segments.to_vec());
    for round in 0..MAX_ROUNDS {
        let pieces = planarize(&current, terminals);
        let forest = spanning_forest(pieces);
        let pruned = prune_edges(forest, terminals);
        let next = canonical(fuse_pass_through(pruned, terminals));
        if next == current {
            tracing::trace!(round, edges = next.len(), "simplify converged");
            return next;
        }
        current = next;
    }
    tracing::debug!(edges = current.len(), "simplify hit round cap");
    current
}

/// Orient each edge low-to-high and sort the list.
fn canonical(edges: Vec<Edge>) -> Vec<Edge> {
    let mut out: Vec<Edge> = edges
        .into_iter()
        .map(|e| {
            if cmp_points(e.b, e.a) == Ordering::Less {
                Edge::new(e.b, e.a, e.weight)
            } else {
                e
            }
        })
        .collect();
    out.sort_by(|l, r| cmp_points(l.a, r.a).then_with(|| cmp_points(l.b, r.b)));
    out
}

#[inline]
fn cmp_points(p: Point, q: Point) -> Ordering {
    p.x().total_cmp(&q.x()).then_with(|| p.y().total_cmp(&q.y()))
}

/// A maximal run on one axis line: `fixed` is the shared coordinate.
#[derive(Clone, Copy, Debug)]
struct Run {
    fixed: f64,
    lo: f64,
    hi: f64,
}

impl Run {
    #[inline]
    fn spans(&self, t: f64) -> bool {
        self.lo <= t && t <= self.hi
    }
}

/// Merge overlapping or touching intervals per line.
fn merge_runs(mut raw: HashMap<u64, Vec<(f64, f64)>>) -> Vec<Run> {
    let mut runs = Vec::new();
    for (key, intervals) in raw.iter_mut() {
        let fixed = f64::from_bits(*key);
        intervals.sort_by(|l, r| l.0.total_cmp(&r.0));
        let mut it = intervals.iter().copied();
        let Some((mut lo, mut hi)) = it.next() else {
            continue;
        };
        for (a, b) in it {
            if a <= hi {
                hi = hi.max(b);
            } else {
                runs.push(Run { fixed, lo, hi });
                (lo, hi) = (a, b);
            }
        }
        runs.push(Run { fixed, lo, hi });
    }
    runs
}

/// Split the union of `segments` into pieces whose endpoints are exactly the
/// run ends, terminals, junctions and crossings.
fn planarize(segments: &[Edge], terminals: &[Point]) -> Vec<Edge> {
    let mut rows: HashMap<u64, Vec<(f64, f64)>> = HashMap::new();
    let mut cols: HashMap<u64, Vec<(f64, f64)>> = HashMap::new();
    for e in segments.iter().filter(|e| !e.is_degenerate()) {
        if e.is_horizontal() {
            let (lo, hi) = ordered(e.a.x(), e.b.x());
            rows.entry(e.a.y().to_bits()).or_default().push((lo, hi));
        } else {
            let (lo, hi) = ordered(e.a.y(), e.b.y());
            cols.entry(e.a.x().to_bits()).or_default().push((lo, hi));
        }
    }
    let rows = merge_runs(rows);
    let cols = merge_runs(cols);

    let mut pieces = Vec::new();
    for r in &rows {
        let mut cuts = vec![r.lo, r.hi];
        cuts.extend(
            terminals
                .iter()
                .filter(|t| t.y() == r.fixed && r.spans(t.x()))
                .map(|t| t.x()),
        );
        cuts.extend(
            cols.iter()
                .filter(|c| r.spans(c.fixed) && c.spans(r.fixed))
                .map(|c| c.fixed),
        );
        push_pieces(&mut pieces, cuts, |t| Point::new(t, r.fixed));
    }
    for c in &cols {
        let mut cuts = vec![c.lo, c.hi];
        cuts.extend(
            terminals
                .iter()
                .filter(|t| t.x() == c.fixed && c.spans(t.y()))
                .map(|t| t.y()),
        );
        cuts.extend(
            rows.iter()
                .filter(|r| c.spans(r.fixed) && r.spans(c.fixed))
                .map(|r| r.fixed),
        );
        push_pieces(&mut pieces, cuts, |t| Point::new(c.fixed, t));
    }
    pieces
}

fn push_pieces(out: &mut Vec<Edge>, mut cuts: Vec<f64>, at: impl Fn(f64) -> Point) {
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();
    for w in cuts.windows(2) {
        out.push(Edge::manhattan(at(w[0]), at(w[1])));
    }
}

#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Kruskal over the pieces: cheapest edges first, skip those closing a loop.
fn spanning_forest(mut pieces: Vec<Edge>) -> Vec<Edge> {
    pieces = canonical(pieces);
    pieces.sort_by(|l, r| l.weight.total_cmp(&r.weight));
    let mut index: HashMap<Point, usize> = HashMap::new();
    for e in &pieces {
        for p in [e.a, e.b] {
            let next = index.len();
            index.entry(p).or_insert(next);
        }
    }
    let mut uf = UnionFind::<usize>::new(index.len());
    pieces
        .into_iter()
        .filter(|e| uf.union(index[&e.a], index[&e.b]))
        .collect()
}

/// Merge pairs of collinear edges that meet at a non-terminal vertex with no
/// other incident edge.
fn fuse_pass_through(mut edges: Vec<Edge>, terminals: &[Point]) -> Vec<Edge> {
    let terminals: HashSet<Point> = terminals.iter().copied().collect();
    while let Some((i, j, v)) = find_pass_through(&edges, &terminals) {
        let (Some(a), Some(b)) = (edges[i].other(v), edges[j].other(v)) else {
            break;
        };
        let (hi, lo) = if i > j { (i, j) } else { (j, i) };
        edges.swap_remove(hi);
        edges.swap_remove(lo);
        edges.push(Edge::manhattan(a, b));
    }
    edges
}

fn find_pass_through(edges: &[Edge], terminals: &HashSet<Point>) -> Option<(usize, usize, Point)> {
    let mut incident: HashMap<Point, Vec<usize>> = HashMap::new();
    for (k, e) in edges.iter().enumerate() {
        incident.entry(e.a).or_default().push(k);
        incident.entry(e.b).or_default().push(k);
    }
    let mut candidates: Vec<(&Point, &Vec<usize>)> = incident
        .iter()
        .filter(|(p, ids)| ids.len() == 2 && !terminals.contains(*p))
        .collect();
    // HashMap order is arbitrary; fuse in a fixed order.
    candidates.sort_by(|l, r| cmp_points(*l.0, *r.0));
    candidates.into_iter().find_map(|(p, ids)| {
        let (e, f) = (&edges[ids[0]], &edges[ids[1]]);
        let collinear =
            (e.is_horizontal() && f.is_horizontal()) || (e.is_vertical() && f.is_vertical());
        collinear.then_some((ids[0], ids[1], *p))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{check_edges, Verdict};
    use crate::cost::edges_cost;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn seg(a: (f64, f64), b: (f64, f64)) -> Edge {
        Edge::manhattan(Point::from(a), Point::from(b))
    }

    #[test]
    fn overlapping_segments_are_absorbed() {
        // (0,0)-(0,4) contains (0,1)-(0,3); plus a second copy of part of it.
        let segs = [
            seg((0.0, 0.0), (0.0, 4.0)),
            seg((0.0, 1.0), (0.0, 3.0)),
            seg((0.0, 3.0), (0.0, 0.0)),
        ];
        let terminals = [p(0.0, 0.0), p(0.0, 4.0)];
        let out = simplify(&segs, &terminals);
        assert_eq!(out, vec![seg((0.0, 0.0), (0.0, 4.0))]);
    }

    #[test]
    fn collinear_chain_keeps_terminals_as_endpoints() {
        let segs = [seg((0.0, 0.0), (0.0, 5.0)), seg((0.0, 5.0), (0.0, 10.0))];
        let terminals = [p(0.0, 0.0), p(0.0, 5.0), p(0.0, 10.0)];
        let out = simplify(&segs, &terminals);
        assert_eq!(out.len(), 2);
        assert_eq!(edges_cost(&out), 10.0);
    }

    #[test]
    fn pass_through_vertices_are_fused_and_zero_length_dropped() {
        let segs = [
            seg((0.0, 0.0), (2.0, 0.0)),
            seg((2.0, 0.0), (2.0, 0.0)),
            seg((2.0, 0.0), (5.0, 0.0)),
        ];
        let terminals = [p(0.0, 0.0), p(5.0, 0.0)];
        assert_eq!(simplify(&segs, &terminals), vec![seg((0.0, 0.0), (5.0, 0.0))]);
    }

    #[test]
    fn loops_are_broken_and_result_is_a_tree() {
        // Two L's around the same unit square close a loop.
        let segs = [
            seg((0.0, 0.0), (0.0, 1.0)),
            seg((0.0, 1.0), (1.0, 1.0)),
            seg((0.0, 0.0), (1.0, 0.0)),
            seg((1.0, 0.0), (1.0, 1.0)),
        ];
        let terminals = [p(0.0, 0.0), p(1.0, 1.0)];
        let out = simplify(&segs, &terminals);
        assert_eq!(check_edges(&out, &terminals), Verdict::Valid);
        assert_eq!(edges_cost(&out), 2.0);
    }

    #[test]
    fn crossings_become_junctions() {
        // A plus sign: the crossing point must split both bars.
        let segs = [seg((0.0, 1.0), (2.0, 1.0)), seg((1.0, 0.0), (1.0, 2.0))];
        let terminals = [p(0.0, 1.0), p(2.0, 1.0), p(1.0, 0.0), p(1.0, 2.0)];
        let out = simplify(&segs, &terminals);
        assert_eq!(out.len(), 4);
        assert_eq!(check_edges(&out, &terminals), Verdict::Valid);
        assert_eq!(edges_cost(&out), 4.0);
    }

    #[test]
    fn simplify_is_a_fixed_point() {
        let segs = [
            seg((0.0, 0.0), (0.0, 3.0)),
            seg((0.0, 3.0), (4.0, 3.0)),
            seg((0.0, 0.0), (0.0, 2.0)),
            seg((0.0, 2.0), (4.0, 2.0)),
        ];
        let terminals = [p(0.0, 0.0), p(4.0, 3.0), p(4.0, 2.0)];
        let once = simplify(&segs, &terminals);
        assert_eq!(simplify(&once, &terminals), once);
        assert_eq!(check_edges(&once, &terminals), Verdict::Valid);
    }
}
