use std::iter::FusedIterator;

use geo::Point;
use hashbrown::{HashMap, HashSet};
use log::{debug, trace};

use super::heuristic::{HeuristicKind, SearchOptions};
use super::state::{Endpoint, NodeRef, RouteOutcome, RouteStep, SearchState};
use crate::routing::queue::PriorityQueue;
use crate::{Minutes, RoadGraph, SnappedPoint, TravelMode};

/// Incremental A* search between two snapped points.
///
/// Each call to [`RouteSearch::advance`] performs one unit of work and
/// returns the step it produced, so a caller can pace or abandon the search
/// at will. The snapped origin and destination take part in the search as
/// virtual nodes linked to the endpoints of their segments.
pub struct RouteSearch<'g> {
    graph: &'g RoadGraph,
    origin: SnappedPoint,
    destination: SnappedPoint,
    mode: TravelMode,
    heuristic: HeuristicKind,
    open_set: PriorityQueue<NodeRef>,
    came_from: HashMap<NodeRef, NodeRef>,
    g_score: HashMap<NodeRef, Minutes>,
    f_score: HashMap<NodeRef, Minutes>,
    closed_set: HashSet<NodeRef>,
    state: SearchState,
    explored: usize,
    // Completion found while exploring the destination, emitted on the next advance
    pending: Option<RouteStep>,
    result: Option<(Vec<NodeRef>, Minutes)>,
}

impl<'g> RouteSearch<'g> {
    pub fn new(
        graph: &'g RoadGraph,
        origin: SnappedPoint,
        destination: SnappedPoint,
        mode: TravelMode,
        options: SearchOptions,
    ) -> Self {
        let mut search = Self {
            graph,
            origin,
            destination,
            mode,
            heuristic: options.heuristic,
            open_set: PriorityQueue::with_capacity(64),
            came_from: HashMap::new(),
            g_score: HashMap::new(),
            f_score: HashMap::new(),
            closed_set: HashSet::new(),
            state: SearchState::Ready,
            explored: 0,
            pending: None,
            result: None,
        };

        let start = NodeRef::ORIGIN;
        let f = search.estimate(origin.location);
        search.g_score.insert(start, 0.0);
        search.f_score.insert(start, f);
        search.open_set.push(start, f);
        search
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    pub fn origin(&self) -> &SnappedPoint {
        &self.origin
    }

    pub fn destination(&self) -> &SnappedPoint {
        &self.destination
    }

    /// Number of `Explore` steps emitted so far
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// Coordinates of a search vertex; `None` for ids missing from the graph
    pub fn location_of(&self, node: NodeRef) -> Option<Point<f64>> {
        match node {
            NodeRef::Real(id) => self.graph.get_node(id).map(|node| node.geometry),
            NodeRef::Virtual(Endpoint::Origin) => Some(self.origin.location),
            NodeRef::Virtual(Endpoint::Destination) => Some(self.destination.location),
        }
    }

    /// Performs one unit of work.
    ///
    /// Returns `None` once a `Complete` step has been handed out.
    pub fn advance(&mut self) -> Option<RouteStep> {
        if self.state.is_terminal() {
            return None;
        }
        if let Some(step) = self.pending.take() {
            self.state = SearchState::Completed;
            return Some(step);
        }
        self.state = SearchState::Exploring;

        while let Some(current) = self.open_set.pop() {
            // Stale entry of an already settled vertex
            if self.closed_set.contains(&current) {
                continue;
            }

            let g = self.g_score.get(&current).copied().unwrap_or(f64::INFINITY);
            let f = self.f_score.get(&current).copied().unwrap_or(f64::INFINITY);
            self.explored += 1;
            trace!("Explore {current:?} g={g:.3} f={f:.3}");

            if current == NodeRef::DESTINATION {
                let path = self.reconstruct_path(current);
                debug!(
                    "Found {} route of {} vertices, {g:.2} min, after {} explored",
                    self.mode,
                    path.len(),
                    self.explored
                );
                self.result = Some((path.clone(), g));
                self.pending = Some(RouteStep::Complete {
                    path,
                    total_cost: g,
                });
            } else {
                self.closed_set.insert(current);
                self.relax_neighbors(current, g);
            }

            return Some(RouteStep::Explore {
                node: current,
                g_score: g,
                f_score: f,
            });
        }

        debug!(
            "No {} route: frontier exhausted after {} explored",
            self.mode, self.explored
        );
        self.state = SearchState::Exhausted;
        self.result = Some((Vec::new(), f64::INFINITY));
        Some(RouteStep::Complete {
            path: Vec::new(),
            total_cost: f64::INFINITY,
        })
    }

    /// Drives the search to its end and returns the final result
    pub fn run_to_end(&mut self) -> RouteOutcome {
        while self.advance().is_some() {}
        self.outcome().unwrap_or_else(|| RouteOutcome {
            path: Vec::new(),
            total_cost: f64::INFINITY,
            explored: self.explored,
        })
    }

    /// Final result, available once the search has reached a terminal state
    pub fn outcome(&self) -> Option<RouteOutcome> {
        if !self.state.is_terminal() {
            return None;
        }
        self.result.as_ref().map(|(path, total_cost)| RouteOutcome {
            path: path.clone(),
            total_cost: *total_cost,
            explored: self.explored,
        })
    }

    fn relax_neighbors(&mut self, current: NodeRef, g: Minutes) {
        for (neighbor, cost) in self.neighbors(current) {
            if !cost.is_finite() || self.closed_set.contains(&neighbor) {
                continue;
            }

            let tentative = g + cost;
            if self
                .g_score
                .get(&neighbor)
                .is_none_or(|&known| tentative < known)
            {
                let h = self.location_of(neighbor).map_or(0.0, |at| self.estimate(at));
                let f = tentative + h;
                self.came_from.insert(neighbor, current);
                self.g_score.insert(neighbor, tentative);
                self.f_score.insert(neighbor, f);
                self.open_set.push(neighbor, f);
            }
        }
    }

    /// Outgoing search edges of `current` with their costs in minutes
    fn neighbors(&self, current: NodeRef) -> Vec<(NodeRef, Minutes)> {
        match current {
            NodeRef::Virtual(Endpoint::Origin) => {
                let (a, b) = self.origin.segment;
                let t = self.origin.interpolation;
                let full = self
                    .graph
                    .edge_cost(a, b, self.mode)
                    .or_else(|| self.graph.edge_cost(b, a, self.mode))
                    .unwrap_or(f64::INFINITY);

                vec![
                    (NodeRef::Real(a), t * full),
                    (NodeRef::Real(b), (1.0 - t) * full),
                ]
            }
            NodeRef::Virtual(Endpoint::Destination) => Vec::new(),
            NodeRef::Real(id) => {
                let (a, b) = self.destination.segment;
                let t = self.destination.interpolation;

                self.graph
                    .get_neighbors(id, self.mode)
                    .map(|edge| {
                        if id == a && edge.target == b {
                            (NodeRef::DESTINATION, edge.cost * t)
                        } else if id == b && edge.target == a {
                            (NodeRef::DESTINATION, edge.cost * (1.0 - t))
                        } else {
                            (NodeRef::Real(edge.target), edge.cost)
                        }
                    })
                    .collect()
            }
        }
    }

    fn estimate(&self, from: Point<f64>) -> Minutes {
        self.heuristic
            .estimate(from, self.destination.location, self.mode)
    }

    fn reconstruct_path(&self, goal: NodeRef) -> Vec<NodeRef> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&previous) = self.came_from.get(&current) {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

impl Iterator for RouteSearch<'_> {
    type Item = RouteStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl FusedIterator for RouteSearch<'_> {}

/// Starts a search with the default fixed-speed heuristic
pub fn find_route<'g>(
    graph: &'g RoadGraph,
    origin: SnappedPoint,
    destination: SnappedPoint,
    mode: TravelMode,
) -> RouteSearch<'g> {
    RouteSearch::new(graph, origin, destination, mode, SearchOptions::default())
}
