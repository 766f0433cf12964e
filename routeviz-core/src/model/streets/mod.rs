//! Road network model

pub mod components;
pub mod network;
pub mod profile;

pub use components::{Edge, Node, Way};
pub use network::{GraphOptions, RoadGraph};
