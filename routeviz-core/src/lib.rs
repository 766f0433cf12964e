//! Road graph routing engine with an incremental A* step protocol.
//!
//! The crate builds a directed, mode-aware road graph from a decoded node/way
//! table, snaps arbitrary coordinates onto the nearest valid road segment and
//! runs an A* search between two snapped points. The search is exposed as a
//! step-by-step state machine so that a consumer can replay it (for example,
//! to animate the frontier) without changing its semantics.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod snapping;

pub use error::Error;
pub use loading::{MapData, NodeRecord, RoadGraphConfig, create_road_graph};
pub use model::{Edge, GraphOptions, ModeSet, Node, RoadGraph, TravelMode, Way};
pub use routing::{
    Endpoint, HeuristicKind, NodeRef, PriorityQueue, RouteOutcome, RouteSearch, RouteStep,
    SearchOptions, SearchState, find_route, route_many, route_to_geojson,
    route_to_geojson_string,
};
pub use snapping::{PointSnapper, SnappedPoint};

/// Identifier of a node in the source map
pub type NodeId = i64;
/// Identifier of a way in the source map
pub type WayId = i64;
/// Travel time in minutes
pub type Minutes = f64;

/// Default search radius for snapping, in meters
pub const DEFAULT_SNAP_RADIUS: f64 = 100.0;
