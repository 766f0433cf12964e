use serde::Serialize;

use crate::{Minutes, NodeId};

/// Which snapped point a virtual node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Origin,
    Destination,
}

/// Vertex of the search space: a graph node or one of the two snapped endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeRef {
    Real(NodeId),
    Virtual(Endpoint),
}

impl NodeRef {
    pub const ORIGIN: NodeRef = NodeRef::Virtual(Endpoint::Origin);
    pub const DESTINATION: NodeRef = NodeRef::Virtual(Endpoint::Destination);

    pub fn is_virtual(self) -> bool {
        matches!(self, NodeRef::Virtual(_))
    }

    pub fn real_id(self) -> Option<NodeId> {
        match self {
            NodeRef::Real(id) => Some(id),
            NodeRef::Virtual(_) => None,
        }
    }
}

/// One unit of search progress handed to the consumer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteStep {
    /// A vertex was taken off the frontier
    Explore {
        node: NodeRef,
        g_score: Minutes,
        f_score: Minutes,
    },
    /// The search ended; an empty path with infinite cost means no route
    Complete {
        path: Vec<NodeRef>,
        total_cost: Minutes,
    },
}

impl RouteStep {
    pub fn is_complete(&self) -> bool {
        matches!(self, RouteStep::Complete { .. })
    }
}

/// Lifecycle of a search: `Ready -> Exploring* -> Completed | Exhausted`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    Ready,
    Exploring,
    /// The destination was reached
    Completed,
    /// The frontier ran dry without reaching the destination
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Completed | SearchState::Exhausted)
    }
}

/// Final result of a search run to the end
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub path: Vec<NodeRef>,
    pub total_cost: Minutes,
    /// Number of `Explore` steps emitted
    pub explored: usize,
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty() && self.total_cost.is_finite()
    }
}
