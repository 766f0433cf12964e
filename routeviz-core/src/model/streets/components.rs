//! Road network components - nodes, ways and directed edges

use geo::Point;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::profile;
use crate::{Minutes, ModeSet, NodeId, TravelMode, WayId};

/// Road graph node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Map ID of the node
    pub id: NodeId,
    /// Node coordinates, `x` is longitude and `y` latitude
    pub geometry: Point<f64>,
}

impl Node {
    pub fn new(id: NodeId, lat: f64, lon: f64) -> Self {
        Self {
            id,
            geometry: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }
}

/// Directed road graph edge (one direction of a way segment)
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Travel time in minutes
    pub cost: Minutes,
    pub way_id: WayId,
    pub is_oneway: bool,
    pub modes: ModeSet,
}

impl Edge {
    pub fn allows(&self, mode: TravelMode) -> bool {
        self.modes.contains(mode)
    }
}

/// Way as delivered by the map decoder: an ordered node list with tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: WayId,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Way {
    pub fn new(id: WayId, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            nodes,
            tags: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn highway(&self) -> Option<&str> {
        self.tag("highway")
    }

    pub fn is_oneway(&self) -> bool {
        self.tag("oneway").is_some_and(profile::is_oneway_value)
    }
}
