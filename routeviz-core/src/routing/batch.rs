use log::debug;
use rayon::prelude::*;

use super::astar::{RouteOutcome, RouteSearch, SearchOptions};
use crate::{RoadGraph, SnappedPoint, TravelMode};

/// Runs one search per `(origin, destination)` pair in parallel.
///
/// Outcomes are returned in the order of `pairs`.
pub fn route_many(
    graph: &RoadGraph,
    pairs: &[(SnappedPoint, SnappedPoint)],
    mode: TravelMode,
    options: SearchOptions,
) -> Vec<RouteOutcome> {
    let outcomes: Vec<RouteOutcome> = pairs
        .par_iter()
        .map(|&(origin, destination)| {
            RouteSearch::new(graph, origin, destination, mode, options).run_to_end()
        })
        .collect();

    debug!(
        "Batch of {} {mode} searches: {} routes found",
        pairs.len(),
        outcomes.iter().filter(|outcome| outcome.is_found()).count()
    );

    outcomes
}
