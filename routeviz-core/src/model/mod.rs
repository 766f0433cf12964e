//! Data model for road routing
//!
//! Contains the travel modes and the road network built from map data.

pub mod mode;
pub mod streets;

pub use mode::{ModeSet, TravelMode};
pub use streets::network::{GraphOptions, RoadGraph};
pub use streets::{Edge, Node, Way};
