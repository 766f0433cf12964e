//! Loading of decoded map data and construction of the road graph

mod builder;
mod config;
mod map_data;

pub use builder::create_road_graph;
pub use config::RoadGraphConfig;
pub use map_data::{MapData, NodeRecord};
