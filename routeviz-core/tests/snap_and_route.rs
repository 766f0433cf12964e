use std::io::Write;

use geo::Point;
use routeviz_core::{
    HeuristicKind, NodeRef, PointSnapper, RoadGraphConfig, RouteSearch, SearchOptions, TravelMode,
    create_road_graph, route_many, route_to_geojson,
};

// A footway crossing a one-way tertiary street
const MAP: &str = r#"{
    "nodes": [
        {"id": 1, "lat": 48.8500, "lon": 2.3500},
        {"id": 2, "lat": 48.8500, "lon": 2.3530},
        {"id": 3, "lat": 48.8500, "lon": 2.3560},
        {"id": 4, "lat": 48.8480, "lon": 2.3530},
        {"id": 5, "lat": 48.8520, "lon": 2.3530}
    ],
    "ways": [
        {"id": 10, "nodes": [1, 2, 3], "tags": {"highway": "tertiary", "oneway": "yes"}},
        {"id": 11, "nodes": [4, 2, 5], "tags": {"highway": "footway"}},
        {"id": 12, "nodes": [3, 5], "tags": {"building": "yes"}}
    ]
}"#;

fn write_map() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MAP.as_bytes()).unwrap();
    file
}

#[test]
fn snapped_points_route_along_the_street() {
    let file = write_map();
    let graph = create_road_graph(&RoadGraphConfig::new(file.path())).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 6);

    let snapper = PointSnapper::new(&graph).with_max_radius(50.0);
    let origin = snapper
        .snap_to_road(Point::new(2.3510, 48.85005), TravelMode::Car)
        .unwrap();
    let destination = snapper
        .snap_to_road(Point::new(2.3550, 48.84995), TravelMode::Car)
        .unwrap();
    assert_eq!(origin.segment, (1, 2));
    assert_eq!(destination.segment, (2, 3));
    assert!(origin.distance_m < 10.0);

    let mut search = RouteSearch::new(
        &graph,
        origin,
        destination,
        TravelMode::Car,
        SearchOptions::default(),
    );
    let outcome = search.run_to_end();
    assert_eq!(
        outcome.path,
        vec![NodeRef::ORIGIN, NodeRef::Real(2), NodeRef::DESTINATION]
    );

    let collection = route_to_geojson(&search, &outcome).unwrap();
    assert_eq!(collection.features.len(), 3);

    // Against the one-way direction there is no car route
    let back = RouteSearch::new(
        &graph,
        destination,
        origin,
        TravelMode::Car,
        SearchOptions::default(),
    )
    .run_to_end();
    assert!(!back.is_found());
}

#[test]
fn exempt_pedestrians_walk_against_one_way() {
    let file = write_map();
    let mut config = RoadGraphConfig::new(file.path());
    config.oneway_exempt_modes = true;
    let graph = create_road_graph(&config).unwrap();

    let snapper = PointSnapper::new(&graph);
    let start = snapper
        .snap_to_road(Point::new(2.3550, 48.85), TravelMode::Pedestrian)
        .unwrap();
    let goal = snapper
        .snap_to_road(Point::new(2.3531, 48.8515), TravelMode::Pedestrian)
        .unwrap();
    assert_eq!(goal.segment, (2, 5));

    let options = SearchOptions {
        heuristic: HeuristicKind::Admissible,
    };
    let outcomes = route_many(&graph, &[(start, goal), (goal, start)], TravelMode::Pedestrian, options);
    assert!(outcomes.iter().all(|outcome| outcome.is_found()));
    assert!(outcomes[0].path.contains(&NodeRef::Real(2)));
    assert!((outcomes[0].total_cost - outcomes[1].total_cost).abs() < 1e-9);
}

#[test]
fn snapping_respects_mode_and_radius() {
    let file = write_map();
    let graph = create_road_graph(&RoadGraphConfig::new(file.path())).unwrap();

    // On the footway, far from the street
    let point = Point::new(2.3531, 48.8519);
    assert!(graph.snap_to_road(point, TravelMode::Car, 100.0).is_none());
    assert!(graph.snap_to_road(point, TravelMode::Bicycle, 100.0).is_none());
    let snapped = graph.snap_to_road(point, TravelMode::Pedestrian, 100.0).unwrap();
    assert_eq!(snapped.segment, (2, 5));
    assert!((0.0..=1.0).contains(&snapped.interpolation));
}
