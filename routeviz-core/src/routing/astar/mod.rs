mod heuristic;
mod search;
mod state;

pub use heuristic::{HeuristicKind, SearchOptions};
pub use search::{RouteSearch, find_route};
pub use state::{Endpoint, NodeRef, RouteOutcome, RouteStep, SearchState};
