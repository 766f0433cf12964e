use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::haversine_distance;
use crate::model::streets::profile;
use crate::{Minutes, TravelMode};

/// Remaining-time estimate used to order the A* frontier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// Fixed cruising speed per mode: car 50, bicycle 20, pedestrian 5 km/h.
    ///
    /// Slower than the fastest road classes, so it can overestimate on fast
    /// roads and the returned route is then not guaranteed optimal.
    #[default]
    Fixed,
    /// Fastest class speed the mode may use; never overestimates
    Admissible,
}

impl HeuristicKind {
    pub fn assumed_speed_kmh(self, mode: TravelMode) -> f64 {
        match self {
            HeuristicKind::Fixed => match mode {
                TravelMode::Car => 50.0,
                TravelMode::Bicycle => 20.0,
                TravelMode::Pedestrian => 5.0,
            },
            HeuristicKind::Admissible => profile::max_speed_kmh(mode),
        }
    }

    pub fn estimate(self, from: Point<f64>, to: Point<f64>, mode: TravelMode) -> Minutes {
        profile::travel_minutes(haversine_distance(from, to), self.assumed_speed_kmh(mode))
    }
}

/// Tunables of a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub heuristic: HeuristicKind,
}
