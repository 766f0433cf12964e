use routeviz_core::{
    NodeRef, RoadGraph, RouteStep, SearchState, SnappedPoint, TravelMode, Way, find_route,
};

mod common;

// Node `n` sits at row (n - 1) / 3 and column (n - 1) % 3
fn grid() -> RoadGraph {
    let ways = vec![
        Way::new(100, vec![1, 2, 3]).with_tag("highway", "residential"),
        Way::new(101, vec![4, 5, 6]).with_tag("highway", "residential"),
        Way::new(102, vec![7, 8, 9]).with_tag("highway", "residential"),
        Way::new(200, vec![1, 4, 7]).with_tag("highway", "residential"),
        Way::new(201, vec![2, 5, 8]).with_tag("highway", "residential"),
        Way::new(202, vec![3, 6, 9]).with_tag("highway", "residential"),
    ];
    RoadGraph::build(common::grid_nodes(3, 52.0, 4.0, 0.01), &ways)
}

fn endpoints(graph: &RoadGraph) -> (SnappedPoint, SnappedPoint) {
    (
        SnappedPoint::on_segment(graph, 1, 2, 0.0).unwrap(),
        SnappedPoint::on_segment(graph, 8, 9, 1.0).unwrap(),
    )
}

#[test]
fn grid_route_from_corner_to_corner() {
    let graph = grid();
    assert_eq!(graph.node_count(), 9);
    assert_eq!(graph.edge_count(), 24);

    let (origin, destination) = endpoints(&graph);
    let mut search = find_route(&graph, origin, destination, TravelMode::Car);
    let steps: Vec<RouteStep> = search.by_ref().collect();

    // Explore steps followed by exactly one Complete
    let (last, explores) = steps.split_last().unwrap();
    assert!(explores.iter().all(|step| !step.is_complete()));
    let RouteStep::Complete { path, total_cost } = last else {
        panic!("search did not complete: {last:?}");
    };

    assert!((4..=6).contains(&path.len()), "path {path:?}");
    assert_eq!(path.first(), Some(&NodeRef::ORIGIN));
    assert_eq!(path.last(), Some(&NodeRef::DESTINATION));
    assert_eq!(search.origin().segment.0, 1);
    assert_eq!(search.destination().segment.1, 9);
    assert_eq!(search.destination().interpolation, 1.0);
    assert!(total_cost.is_finite() && *total_cost > 0.0);

    // Everything explored before the goal itself
    let before_goal = explores.len() - 1;
    assert!((4..=9).contains(&before_goal), "explored {before_goal}");
    // The origin, all eight reachable nodes with f below the optimum, then the goal
    assert_eq!(explores.len(), 10);
    assert_eq!(search.state(), SearchState::Completed);
}

#[test]
fn grid_route_cost_matches_manhattan_distance() {
    let graph = grid();
    let (origin, destination) = endpoints(&graph);
    let outcome = find_route(&graph, origin, destination, TravelMode::Car).run_to_end();

    // Four block edges of ~1.1 km at 40 km/h
    let block = graph.edge_cost(1, 4, TravelMode::Car).unwrap();
    assert!(outcome.total_cost > 3.0 * block);
    assert!(outcome.total_cost < 5.0 * block);
}

#[test]
fn grid_search_is_deterministic() {
    let graph = grid();
    let (origin, destination) = endpoints(&graph);

    for mode in TravelMode::ALL {
        let first: Vec<_> = find_route(&graph, origin, destination, mode).collect();
        let second: Vec<_> = find_route(&graph, origin, destination, mode).collect();
        assert_eq!(first, second, "{mode}");
    }
}

#[test]
fn grid_explores_each_vertex_once() {
    let graph = grid();
    let (origin, destination) = endpoints(&graph);

    let mut seen = std::collections::HashSet::new();
    for step in find_route(&graph, origin, destination, TravelMode::Pedestrian) {
        if let RouteStep::Explore { node, g_score, f_score } = step {
            assert!(seen.insert(node), "{node:?} explored twice");
            assert!(g_score <= f_score);
        }
    }
    assert!(seen.contains(&NodeRef::DESTINATION));
}
