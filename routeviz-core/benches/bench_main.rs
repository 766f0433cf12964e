use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::Point;
use routeviz_core::{
    HeuristicKind, Node, PointSnapper, RoadGraph, RouteSearch, SearchOptions, SnappedPoint,
    TravelMode, Way, route_many,
};

const GRID_SIZE: i64 = 60;
const SPACING: f64 = 0.002;

fn build_grid() -> RoadGraph {
    let nodes: Vec<Node> = (0..GRID_SIZE * GRID_SIZE)
        .map(|index| {
            let (row, col) = (index / GRID_SIZE, index % GRID_SIZE);
            Node::new(
                index + 1,
                52.0 + row as f64 * SPACING,
                4.0 + col as f64 * SPACING,
            )
        })
        .collect();

    let classes = ["residential", "tertiary", "secondary", "living_street"];
    let mut ways = Vec::new();
    for line in 0..GRID_SIZE {
        let highway = classes[(line % 4) as usize];
        let row = (0..GRID_SIZE).map(|col| line * GRID_SIZE + col + 1).collect();
        let column = (0..GRID_SIZE).map(|row| row * GRID_SIZE + line + 1).collect();
        ways.push(Way::new(line, row).with_tag("highway", highway));
        ways.push(Way::new(GRID_SIZE + line, column).with_tag("highway", highway));
    }

    RoadGraph::build(nodes, &ways)
}

fn corner_points(graph: &RoadGraph) -> (SnappedPoint, SnappedPoint) {
    let last = GRID_SIZE * GRID_SIZE;
    let origin = SnappedPoint::on_segment(graph, 1, 2, 0.3).expect("Origin segment must exist");
    let destination = SnappedPoint::on_segment(graph, last - 1, last, 0.6)
        .expect("Destination segment must exist");
    (origin, destination)
}

fn search_benchmark(c: &mut Criterion) {
    let graph = build_grid();
    let (origin, destination) = corner_points(&graph);

    let mut group = c.benchmark_group("astar");
    group.sample_size(30);

    for heuristic in [HeuristicKind::Fixed, HeuristicKind::Admissible] {
        group.bench_function(format!("corner to corner: {heuristic:?}"), |b| {
            b.iter(|| {
                let outcome = RouteSearch::new(
                    &graph,
                    black_box(origin),
                    black_box(destination),
                    TravelMode::Car,
                    SearchOptions { heuristic },
                )
                .run_to_end();
                assert!(outcome.is_found());
            })
        });
    }

    let pairs = vec![(origin, destination); 16];
    group.bench_function("batch of 16", |b| {
        b.iter(|| route_many(&graph, black_box(&pairs), TravelMode::Bicycle, SearchOptions::default()))
    });

    group.finish();
}

fn snapping_benchmark(c: &mut Criterion) {
    let graph = build_grid();
    let snapper = PointSnapper::new(&graph);

    c.bench_function("snap_to_road", |b| {
        b.iter(|| snapper.snap_to_road(black_box(Point::new(4.0513, 52.0377)), TravelMode::Pedestrian))
    });
}

criterion_group!(benches, search_benchmark, snapping_benchmark);
criterion_main!(benches);
