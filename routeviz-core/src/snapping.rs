//! Snapping of arbitrary coordinates onto the road network.

use geo::Point;
use log::trace;
use rstar::AABB;

use crate::geometry::{EARTH_RADIUS_M, haversine_distance, interpolate, project_onto_segment};
use crate::{DEFAULT_SNAP_RADIUS, Error, NodeId, RoadGraph, TravelMode};

/// Widening applied to the candidate envelope so that the haversine check,
/// not the degree box, decides what is in range.
const ENVELOPE_SLACK: f64 = 2.0;

/// A location on the road network: a fraction along a directed segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedPoint {
    /// Snapped location, `x` is longitude and `y` latitude
    pub location: Point<f64>,
    /// Segment endpoints `(a, b)`
    pub segment: (NodeId, NodeId),
    /// Position along the segment: 0 at `a`, 1 at `b`
    pub interpolation: f64,
    /// Distance in meters from the query point; 0 for points built directly
    pub distance_m: f64,
}

impl SnappedPoint {
    pub fn new(location: Point<f64>, segment: (NodeId, NodeId), interpolation: f64) -> Self {
        Self {
            location,
            segment,
            interpolation: interpolation.clamp(0.0, 1.0),
            distance_m: 0.0,
        }
    }

    /// Point at `interpolation` along the segment `a -> b` of `graph`
    pub fn on_segment(
        graph: &RoadGraph,
        a: NodeId,
        b: NodeId,
        interpolation: f64,
    ) -> Result<Self, Error> {
        let from = graph.get_node(a).ok_or(Error::UnknownNode(a))?;
        let to = graph.get_node(b).ok_or(Error::UnknownNode(b))?;
        let t = interpolation.clamp(0.0, 1.0);

        Ok(Self::new(interpolate(from.geometry, to.geometry, t), (a, b), t))
    }

    pub fn start(&self) -> NodeId {
        self.segment.0
    }

    pub fn end(&self) -> NodeId {
        self.segment.1
    }
}

/// Finds the nearest segment valid for a travel mode within a radius
#[derive(Debug, Clone, Copy)]
pub struct PointSnapper<'g> {
    graph: &'g RoadGraph,
    max_radius: f64,
}

impl<'g> PointSnapper<'g> {
    pub fn new(graph: &'g RoadGraph) -> Self {
        Self {
            graph,
            max_radius: DEFAULT_SNAP_RADIUS,
        }
    }

    /// Sets the search radius in meters
    #[must_use]
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Projects `point` onto the closest `mode` segment within the radius.
    ///
    /// Segments are projected in planar (lon, lat) space and compared by
    /// haversine distance. Ties go to the edge stored first.
    pub fn snap_to_road(&self, point: Point<f64>, mode: TravelMode) -> Option<SnappedPoint> {
        let mut candidates: Vec<_> = search_envelopes(point, self.max_radius)
            .iter()
            .flat_map(|envelope| self.graph.segments_within(envelope))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<SnappedPoint> = None;
        for index in candidates {
            let Some((from, to, edge)) = self.graph.segment(index) else {
                continue;
            };
            if !edge.allows(mode) {
                continue;
            }

            let (t, closest) = project_onto_segment(point, from.geometry, to.geometry);
            let distance = haversine_distance(point, closest);
            if distance.is_nan() || distance > self.max_radius {
                continue;
            }

            if best.is_none_or(|current| distance < current.distance_m) {
                best = Some(SnappedPoint {
                    location: closest,
                    segment: (from.id, to.id),
                    interpolation: t,
                    distance_m: distance,
                });
            }
        }

        match &best {
            Some(snap) => trace!(
                "Snapped {point:?} to {:?} at t={:.3} ({:.1} m)",
                snap.segment, snap.interpolation, snap.distance_m
            ),
            None => trace!("No {mode} segment within {} m of {point:?}", self.max_radius),
        }

        best
    }
}

impl RoadGraph {
    /// Snaps `point` onto the nearest `mode` segment within `max_radius` meters
    pub fn snap_to_road(
        &self,
        point: Point<f64>,
        mode: TravelMode,
        max_radius: f64,
    ) -> Option<SnappedPoint> {
        PointSnapper::new(self)
            .with_max_radius(max_radius)
            .snap_to_road(point, mode)
    }
}

/// Degree boxes around `point` that together contain every location within
/// `radius_m`; a box crossing the antimeridian is split in two
fn search_envelopes(point: Point<f64>, radius_m: f64) -> Vec<AABB<[f64; 2]>> {
    let lat_pad = (radius_m.max(0.0) / EARTH_RADIUS_M).to_degrees() * ENVELOPE_SLACK;
    let cos_lat = point.y().to_radians().cos().abs();
    let lon_pad = if cos_lat < 1e-6 {
        360.0
    } else {
        (lat_pad / cos_lat).min(360.0)
    };

    let (min_lat, max_lat) = (point.y() - lat_pad, point.y() + lat_pad);
    let (min_lon, max_lon) = (point.x() - lon_pad, point.x() + lon_pad);
    let mut envelopes = vec![AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])];

    if min_lon < -180.0 {
        envelopes.push(AABB::from_corners([min_lon + 360.0, min_lat], [180.0, max_lat]));
    }
    if max_lon > 180.0 {
        envelopes.push(AABB::from_corners([-180.0, min_lat], [max_lon - 360.0, max_lat]));
    }

    envelopes
}
