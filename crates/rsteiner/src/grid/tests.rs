use super::*;
use crate::geom::Point;

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

#[test]
fn empty_input_has_no_grid() {
    assert!(GridGraph::build(&[]).is_none());
}

#[test]
fn edge_count_matches_degree_formula() {
    for (w, h) in [(1, 1), (2, 1), (1, 3), (2, 2), (3, 4)] {
        let raw: Vec<(f64, f64)> = (0..=w.max(h))
            .map(|k| ((k.min(w)) as f64, (k.min(h)) as f64))
            .collect();
        let g = GridGraph::build(&pts(&raw)).unwrap();
        assert_eq!((g.width(), g.height()), (w, h));
        let by_degree = (4 * 2 + 2 * 3 * (h - 1) + 2 * 3 * (w - 1) + 4 * (h - 1) * (w - 1)) / 2;
        assert_eq!(g.edge_count(), by_degree);
        assert_eq!(g.edge_count(), GridGraph::expected_edge_count(w, h));
    }
}

#[test]
fn ordering_is_row_major_then_column_major() {
    let g = GridGraph::build(&pts(&[(0.0, 0.0), (1.0, 2.0), (3.0, 1.0)])).unwrap();
    assert_eq!(g.xs, vec![0.0, 1.0, 3.0]);
    assert_eq!(g.ys, vec![0.0, 1.0, 2.0]);
    assert_eq!(g.edge_count(), 12);
    // first row, left to right
    assert_eq!(g.edges[0].a, Point::new(0.0, 0.0));
    assert_eq!(g.edges[0].b, Point::new(1.0, 0.0));
    assert_eq!(g.edges[1].weight, 2.0);
    // last horizontal is top row, right cell
    assert_eq!(g.edges[5].a, Point::new(1.0, 2.0));
    assert!(g.edges[..6].iter().all(|e| e.is_horizontal()));
    // verticals: column x=0 bottom to top first
    assert_eq!(g.edges[6].a, Point::new(0.0, 0.0));
    assert_eq!(g.edges[6].b, Point::new(0.0, 1.0));
    assert_eq!(g.edges[11].a, Point::new(3.0, 1.0));
    assert!(g.edges[6..].iter().all(|e| e.is_vertical()));
}

#[test]
fn build_is_deterministic_regardless_of_input_order() {
    let a = GridGraph::build(&pts(&[(4.0, 1.0), (0.0, 3.0), (2.0, 2.0)])).unwrap();
    let b = GridGraph::build(&pts(&[(2.0, 2.0), (4.0, 1.0), (0.0, 3.0)])).unwrap();
    assert_eq!(a.edges, b.edges);
}

#[test]
fn collinear_terminals_yield_straight_chain() {
    let g = GridGraph::build(&pts(&[(0.0, 0.0), (0.0, 10.0), (0.0, 5.0)])).unwrap();
    assert!(g.is_collinear());
    let path = g.collinear_path().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.iter().map(|e| e.weight).sum::<f64>(), 10.0);
    assert_eq!(path[0].b, path[1].a);

    let single = GridGraph::build(&pts(&[(1.0, 1.0), (1.0, 1.0)])).unwrap();
    assert!(single.is_collinear());
    assert!(single.collinear_path().unwrap().is_empty());
}

#[test]
fn lookup_helpers() {
    let g = GridGraph::build(&pts(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
    assert!(g.collinear_path().is_none());
    let i = g.edge_index(Point::new(1.0, 1.0), Point::new(1.0, 0.0)).unwrap();
    assert!(g.edges[i].is_vertical());
    assert!(g.edge_index(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).is_none());
    let mut sel = vec![false; g.edge_count()];
    sel[i] = true;
    assert_eq!(g.edges_of(&sel), vec![g.edges[i]]);
    assert_eq!(g.weights(), vec![1.0; 4]);
}
