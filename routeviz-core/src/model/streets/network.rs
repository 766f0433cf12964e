//! Directed road network built from map nodes and ways

use std::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::primitives::{GeomWithData, Line as SegmentLine};
use rstar::{AABB, RTree};

use super::components::{Edge, Node, Way};
use super::profile;
use crate::geometry::haversine_distance;
use crate::{Minutes, ModeSet, NodeId, TravelMode};

/// Segment bounding geometry in (lon, lat) tagged with its edge
pub(crate) type IndexedSegment = GeomWithData<SegmentLine<[f64; 2]>, EdgeIndex>;

/// Options controlling how ways are turned into edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Add a reverse edge on one-way ways for bicycles and pedestrians.
    ///
    /// Off by default: a one-way way then has no reverse edge for any mode.
    pub oneway_exempt_modes: bool,
}

/// Road graph with per-mode edges and a segment index used for snapping
pub struct RoadGraph {
    pub(crate) graph: DiGraph<Node, Edge>,
    node_map: HashMap<NodeId, NodeIndex>,
    segment_index: RTree<IndexedSegment>,
}

impl Debug for RoadGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoadGraph with {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}

impl RoadGraph {
    /// Builds the graph with default [`GraphOptions`]
    pub fn build(nodes: impl IntoIterator<Item = Node>, ways: &[Way]) -> Self {
        Self::build_with(nodes, ways, GraphOptions::default())
    }

    pub fn build_with(
        nodes: impl IntoIterator<Item = Node>,
        ways: &[Way],
        options: GraphOptions,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for node in nodes {
            match node_map.entry(node.id) {
                Entry::Vacant(entry) => {
                    entry.insert(graph.add_node(node));
                }
                Entry::Occupied(_) => debug!("Duplicate node {} ignored", node.id),
            }
        }

        let mut skipped_ways = 0usize;
        let mut skipped_segments = 0usize;

        for way in ways {
            let modes = way.highway().map(profile::allowed_modes).unwrap_or_default();
            if modes.is_empty() {
                skipped_ways += 1;
                continue;
            }
            let speed = way.highway().map_or(profile::DEFAULT_SPEED_KMH, profile::speed_kmh);
            let oneway = way.is_oneway();
            let reverse_modes = if !oneway {
                modes
            } else if options.oneway_exempt_modes {
                modes.without(TravelMode::Car)
            } else {
                ModeSet::EMPTY
            };

            for (&a, &b) in way.nodes.iter().tuple_windows() {
                let (Some(&source), Some(&target)) = (node_map.get(&a), node_map.get(&b)) else {
                    skipped_segments += 1;
                    continue;
                };

                let distance = haversine_distance(graph[source].geometry, graph[target].geometry);
                let cost = profile::travel_minutes(distance, speed);

                graph.add_edge(
                    source,
                    target,
                    Edge {
                        target: b,
                        cost,
                        way_id: way.id,
                        is_oneway: oneway,
                        modes,
                    },
                );

                if !reverse_modes.is_empty() {
                    graph.add_edge(
                        target,
                        source,
                        Edge {
                            target: a,
                            cost,
                            way_id: way.id,
                            is_oneway: oneway,
                            modes: reverse_modes,
                        },
                    );
                }
            }
        }

        if skipped_ways > 0 {
            debug!("Skipped {skipped_ways} ways without a routable highway class");
        }
        if skipped_segments > 0 {
            debug!("Skipped {skipped_segments} way segments referencing unknown nodes");
        }
        if graph.edge_count() == 0 && !ways.is_empty() {
            warn!("Road graph has no edges: none of {} ways is routable", ways.len());
        }

        let segment_index = build_segment_index(&graph);

        info!(
            "Built road graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        RoadGraph {
            graph,
            node_map,
            segment_index,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_map.contains_key(&id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.node_map.get(&id).map(|&index| &self.graph[index])
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All edges with their source node id, in storage order
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()].id, edge.weight()))
    }

    /// Outgoing edges of `id` that admit `mode`; empty for unknown nodes
    pub fn get_neighbors(&self, id: NodeId, mode: TravelMode) -> impl Iterator<Item = &Edge> {
        self.node_map
            .get(&id)
            .into_iter()
            .flat_map(move |&index| self.graph.edges(index))
            .map(|edge| edge.weight())
            .filter(move |edge| edge.allows(mode))
    }

    /// Cheapest `mode` edge going from `from` to `to`
    pub fn edge_cost(&self, from: NodeId, to: NodeId, mode: TravelMode) -> Option<Minutes> {
        self.get_neighbors(from, mode)
            .filter(|edge| edge.target == to)
            .map(|edge| edge.cost)
            .reduce(f64::min)
    }

    /// Source node, target node and payload of a stored edge
    pub(crate) fn segment(&self, index: EdgeIndex) -> Option<(&Node, &Node, &Edge)> {
        let (source, target) = self.graph.edge_endpoints(index)?;
        let edge = self.graph.edge_weight(index)?;
        Some((&self.graph[source], &self.graph[target], edge))
    }

    /// Edges whose bounding box intersects `envelope`, in storage order
    pub(crate) fn segments_within(&self, envelope: &AABB<[f64; 2]>) -> Vec<EdgeIndex> {
        let mut found: Vec<EdgeIndex> = self
            .segment_index
            .locate_in_envelope_intersecting(envelope)
            .map(|segment| segment.data)
            .collect();
        found.sort_unstable();
        found
    }
}

fn build_segment_index(graph: &DiGraph<Node, Edge>) -> RTree<IndexedSegment> {
    let segments = graph
        .edge_references()
        .map(|edge| {
            let from = graph[edge.source()].geometry;
            let to = graph[edge.target()].geometry;
            GeomWithData::new(
                SegmentLine::new([from.x(), from.y()], [to.x(), to.y()]),
                edge.id(),
            )
        })
        .collect();

    RTree::bulk_load(segments)
}
