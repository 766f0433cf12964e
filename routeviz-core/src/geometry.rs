//! Distance and projection helpers on (lon, lat) points.
//!
//! Points follow the `geo` convention: `x` is longitude, `y` is latitude,
//! both in degrees.

use geo::{Line, LineLocatePoint, Point};

/// Mean Earth radius in meters
// geo's `Haversine` uses 6_371_008.8 m; costs and snap radii are defined on this sphere
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points
pub fn haversine_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Projects `point` onto the segment `from -> to` in planar (lon, lat) space.
///
/// Returns the clamped fraction along the segment and the projected point.
/// A zero-length segment resolves to `(0.0, from)`.
pub fn project_onto_segment(point: Point<f64>, from: Point<f64>, to: Point<f64>) -> (f64, Point<f64>) {
    if from == to {
        return (0.0, from);
    }

    let line = Line::new(from, to);
    let fraction = line
        .line_locate_point(&point)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    (fraction, from + (to - from) * fraction)
}

/// Point at `fraction` along `from -> to`
pub fn interpolate(from: Point<f64>, to: Point<f64>, fraction: f64) -> Point<f64> {
    from + (to - from) * fraction
}
