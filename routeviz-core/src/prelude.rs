// Re-export key components
pub use crate::loading::{MapData, RoadGraphConfig, create_road_graph};
pub use crate::model::{GraphOptions, RoadGraph, TravelMode};
pub use crate::routing::{
    HeuristicKind, NodeRef, RouteOutcome, RouteSearch, RouteStep, SearchOptions, SearchState,
    find_route, route_many, route_to_geojson,
};
pub use crate::snapping::{PointSnapper, SnappedPoint};

// Core types
pub use crate::Minutes; // travel time in minutes
pub use crate::NodeId;
