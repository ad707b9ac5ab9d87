//! Cross-strategy behaviour: shared postconditions and cost ordering.

use super::*;
use crate::analyzer::{check_edges, is_connected_edges, Verdict};
use crate::cost::manhattan_length;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

fn small_sets() -> Vec<Vec<Point>> {
    vec![
        pts(&[(0.0, 0.0), (3.0, 4.0)]),
        pts(&[(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)]),
        pts(&[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]),
        pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]),
        pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0)]),
        pts(&[(1.0, 1.0), (4.0, 1.0), (1.0, 1.0), (2.0, 3.0)]),
    ]
}

/// Every terminal is an endpoint, the edges form one component, and (for
/// trees) `|E| = |V| - 1`.
fn assert_spans(tree: &SteinerTree, terminals: &[Point]) {
    let points = tree.points();
    for t in terminals {
        assert!(points.contains(t), "terminal {t} missing");
    }
    assert!(is_connected_edges(tree.edges()));
    assert!(tree.edges().iter().all(Edge::is_axis_aligned));
    assert!((tree.cost() - manhattan_length(tree.edges())).abs() < 1e-9);
}

fn assert_tree(tree: &SteinerTree, terminals: &[Point]) {
    assert_spans(tree, terminals);
    assert_eq!(tree.len() + 1, tree.points().len());
    assert_eq!(check_edges(tree.edges(), terminals), Verdict::Valid);
}

#[test]
fn all_strategies_span_their_terminals() {
    let cfg = SolverCfg::default();
    let mut rng = StdRng::seed_from_u64(2024);
    for set in small_sets() {
        for strategy in Strategy::ALL {
            let tree = solve(strategy, &set, &cfg, &mut rng)
                .unwrap()
                .unwrap_or_else(|| panic!("{strategy} found nothing for {set:?}"));
            assert_tree(&tree, &set);
        }
    }
}

#[test]
fn exhaustive_never_costs_more_than_greedy() {
    for set in small_sets() {
        let g = solve_greedy(&set, GreedyCfg::default()).unwrap().unwrap();
        let e = solve_exhaustive(&set, ExhaustiveCfg::default())
            .unwrap()
            .unwrap();
        assert!(
            e.cost() <= g.cost() + 1e-9,
            "exhaustive {} > greedy {} on {set:?}",
            e.cost(),
            g.cost()
        );
    }
}

#[test]
fn collinear_terminals_form_a_straight_chain() {
    let set = pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0)]);
    let mut rng = StdRng::seed_from_u64(0);
    for strategy in Strategy::ALL {
        let tree = solve(strategy, &set, &SolverCfg::default(), &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(tree.cost(), 10.0);
        assert_eq!(tree.len(), 2);
        assert!(tree.edges().iter().all(|e| e.is_vertical()));
    }
}

#[test]
fn two_terminals_take_the_manhattan_route() {
    let set = pts(&[(0.0, 0.0), (3.0, 4.0)]);
    let mut rng = StdRng::seed_from_u64(1);
    for strategy in Strategy::ALL {
        let tree = solve(strategy, &set, &SolverCfg::default(), &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(tree.cost(), 7.0, "{strategy}");
        assert_eq!(tree.len(), 2);
        let corner_is_used = tree.points().contains(&Point::new(0.0, 4.0))
            || tree.points().contains(&Point::new(3.0, 0.0));
        assert!(corner_is_used);
    }
}

#[test]
fn reinforcement_on_average_matches_or_beats_greedy() {
    let set = pts(&[(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)]);
    let greedy = solve_greedy(&set, GreedyCfg::default()).unwrap().unwrap();
    let optimum = solve_exhaustive(&set, ExhaustiveCfg::default())
        .unwrap()
        .unwrap();
    let runs = 12;
    let mut total = 0.0;
    for seed in 0..runs {
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = solve_reinforce(&set, ReinforceCfg::default(), &mut rng)
            .unwrap()
            .unwrap();
        assert!(tree.cost() >= optimum.cost() - 1e-9);
        total += tree.cost();
    }
    let mean = total / runs as f64;
    assert!(
        mean <= greedy.cost() + 1e-9,
        "mean {mean} vs greedy {}",
        greedy.cost()
    );
}

#[test]
fn insufficient_input_is_not_an_error() {
    let mut rng = StdRng::seed_from_u64(5);
    for strategy in Strategy::ALL {
        let cfg = SolverCfg::default();
        assert_eq!(solve(strategy, &[], &cfg, &mut rng), Ok(None));
        assert_eq!(
            solve(strategy, &pts(&[(2.0, 2.0)]), &cfg, &mut rng),
            Ok(None)
        );
    }
}

#[test]
fn non_finite_terminals_are_rejected() {
    let set = vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
    let mut rng = StdRng::seed_from_u64(5);
    for strategy in Strategy::ALL {
        let err = solve(strategy, &set, &SolverCfg::default(), &mut rng).unwrap_err();
        assert_eq!(err, SolveError::NonFiniteTerminal { index: 1 });
        assert!(err.to_string().contains("#1"));
    }
}

#[test]
fn strategy_names_round_trip() {
    for s in Strategy::ALL {
        assert_eq!(s.as_str().parse::<Strategy>(), Ok(s));
        assert_eq!(s.solver(&SolverCfg::default()).name(), s.as_str());
    }
    assert_eq!("Kruskal".parse::<Strategy>(), Ok(Strategy::Greedy));
    assert_eq!("ant-colony".parse::<Strategy>(), Ok(Strategy::Reinforcement));
    assert!("simulated-annealing".parse::<Strategy>().is_err());
}

#[test]
fn tree_accessors() {
    let tree = SteinerTree::from_edges(vec![Edge::manhattan(
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
    )]);
    assert_eq!(tree.cost(), 2.0);
    assert!(!tree.is_empty());
    assert_eq!(tree.points().len(), 2);
    assert_eq!(tree.clone().into_edges().len(), 1);
}
