//! Route search over the road graph

pub mod astar;
mod batch;
mod export;
pub mod queue;

pub use astar::{
    Endpoint, HeuristicKind, NodeRef, RouteOutcome, RouteSearch, RouteStep, SearchOptions,
    SearchState, find_route,
};
pub use batch::route_many;
pub use export::{route_to_geojson, route_to_geojson_string};
pub use queue::PriorityQueue;
