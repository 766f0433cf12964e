use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::GraphOptions;

/// Where to read the map from and how to turn it into a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadGraphConfig {
    /// JSON file with `nodes` and `ways`
    pub map_path: PathBuf,
    /// Let bicycles and pedestrians travel one-way streets in reverse
    #[serde(default)]
    pub oneway_exempt_modes: bool,
}

impl RoadGraphConfig {
    pub fn new(map_path: impl Into<PathBuf>) -> Self {
        Self {
            map_path: map_path.into(),
            oneway_exempt_modes: false,
        }
    }

    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            oneway_exempt_modes: self.oneway_exempt_modes,
        }
    }
}
