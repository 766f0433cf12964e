//! Fixed highway classification tables: travel speed and allowed modes.

use crate::{Minutes, ModeSet, TravelMode};

/// Speed used for classes missing from [`HIGHWAY_SPEEDS_KMH`]
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

const HIGHWAY_SPEEDS_KMH: &[(&str, f64)] = &[
    ("motorway", 120.0),
    ("motorway_link", 60.0),
    ("trunk", 100.0),
    ("trunk_link", 50.0),
    ("primary", 80.0),
    ("primary_link", 40.0),
    ("secondary", 60.0),
    ("secondary_link", 30.0),
    ("tertiary", 50.0),
    ("tertiary_link", 25.0),
    ("unclassified", 40.0),
    ("residential", 40.0),
    ("living_street", 10.0),
    ("service", 20.0),
    ("track", 15.0),
    ("cycleway", 15.0),
    ("path", 5.0),
    ("footway", 5.0),
    ("pedestrian", 5.0),
    ("steps", 3.0),
];

const CAR_ROADS: &[&str] = &[
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "service",
];

const BICYCLE_ROADS: &[&str] = &[
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "service",
    "track",
    "cycleway",
    "path",
];

const PEDESTRIAN_ROADS: &[&str] = &[
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "unclassified",
    "residential",
    "living_street",
    "service",
    "track",
    "path",
    "footway",
    "pedestrian",
    "steps",
];

const ONEWAY_VALUES: &[&str] = &["yes", "1", "true"];

fn roads_for(mode: TravelMode) -> &'static [&'static str] {
    match mode {
        TravelMode::Car => CAR_ROADS,
        TravelMode::Bicycle => BICYCLE_ROADS,
        TravelMode::Pedestrian => PEDESTRIAN_ROADS,
    }
}

/// Speed in km/h for a highway class
pub fn speed_kmh(highway: &str) -> f64 {
    HIGHWAY_SPEEDS_KMH
        .iter()
        .find(|(class, _)| *class == highway)
        .map_or(DEFAULT_SPEED_KMH, |(_, speed)| *speed)
}

/// Modes allowed on a highway class, empty when the class is not routable
pub fn allowed_modes(highway: &str) -> ModeSet {
    TravelMode::ALL
        .into_iter()
        .filter(|mode| roads_for(*mode).contains(&highway))
        .collect()
}

/// Fastest speed of any class the mode may travel on
pub fn max_speed_kmh(mode: TravelMode) -> f64 {
    roads_for(mode)
        .iter()
        .map(|class| speed_kmh(class))
        .fold(0.0, f64::max)
}

pub fn is_oneway_value(value: &str) -> bool {
    ONEWAY_VALUES.contains(&value)
}

/// Minutes needed to cover `distance_m` meters at `speed_kmh`
pub fn travel_minutes(distance_m: f64, speed_kmh: f64) -> Minutes {
    (distance_m / 1000.0) / speed_kmh * 60.0
}
