use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{Error, GraphOptions, Node, NodeId, RoadGraph, Way};

/// Node row of the map interchange format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl NodeRecord {
    fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node::new(record.id, record.lat, record.lon)
    }
}

/// Decoded map: a node table and the ways referencing it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub ways: Vec<Way>,
}

impl MapData {
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let data: MapData = serde_json::from_reader(reader)?;
        debug!(
            "Parsed map data: {} nodes, {} ways",
            data.nodes.len(),
            data.ways.len()
        );
        Ok(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Builds the road graph, dropping nodes with out-of-range coordinates
    pub fn into_graph(self, options: GraphOptions) -> RoadGraph {
        let total = self.nodes.len();
        let nodes: Vec<Node> = self
            .nodes
            .into_iter()
            .filter(NodeRecord::has_valid_coordinates)
            .map(Node::from)
            .collect();

        if nodes.len() < total {
            warn!(
                "Dropped {} nodes with invalid coordinates",
                total - nodes.len()
            );
        }

        RoadGraph::build_with(nodes, &self.ways, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TravelMode;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": 1, "lat": 52.0, "lon": 4.0},
            {"id": 2, "lat": 52.0, "lon": 4.001},
            {"id": 3, "lat": 95.0, "lon": 4.002}
        ],
        "ways": [
            {"id": 7, "nodes": [1, 2, 3], "tags": {"highway": "cycleway", "oneway": "yes"}},
            {"id": 8, "nodes": [2, 1]}
        ]
    }"#;

    #[test]
    fn parses_nodes_and_ways() {
        let data = MapData::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(data.nodes.len(), 3);
        assert_eq!(data.ways[0].highway(), Some("cycleway"));
        assert!(data.ways[1].tags.is_empty());
    }

    #[test]
    fn invalid_nodes_are_dropped_before_building() {
        let graph = MapData::from_reader(SAMPLE.as_bytes())
            .unwrap()
            .into_graph(GraphOptions::default());

        assert_eq!(graph.node_count(), 2);
        // 2 -> 3 references the dropped node; the second way has no highway tag
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edge_cost(1, 2, TravelMode::Bicycle).is_some());
        assert!(graph.edge_cost(1, 2, TravelMode::Car).is_none());
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = MapData::from_reader(r#"{"nodes": [{"id": "x"}]}"#.as_bytes());
        assert!(matches!(result, Err(Error::JsonError(_))));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let data = MapData::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(data, MapData::default());
    }
}
