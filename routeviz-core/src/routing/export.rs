use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::astar::{RouteOutcome, RouteSearch};
use crate::{Error, SnappedPoint};

/// Converts a found route to a `GeoJSON` `FeatureCollection`.
///
/// The collection holds the route line followed by the origin and destination
/// markers. Fails for outcomes without a path.
pub fn route_to_geojson(
    search: &RouteSearch<'_>,
    outcome: &RouteOutcome,
) -> Result<FeatureCollection, Error> {
    if !outcome.is_found() {
        return Err(Error::InvalidData("No route to export".to_string()));
    }

    let coords = outcome
        .path
        .iter()
        .map(|&node| {
            search
                .location_of(node)
                .map(Coord::from)
                .ok_or_else(|| Error::InvalidData(format!("Route vertex {node:?} has no location")))
        })
        .collect::<Result<Vec<Coord<f64>>, Error>>()?;

    let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": "route",
            "mode": search.mode(),
            "total_cost_minutes": outcome.total_cost,
            "explored": outcome.explored,
            "vertices": outcome.path.len(),
        }
    });
    let route = Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?;

    Ok(FeatureCollection {
        features: vec![
            route,
            create_endpoint_feature("origin", search.origin())?,
            create_endpoint_feature("destination", search.destination())?,
        ],
        bbox: None,
        foreign_members: None,
    })
}

pub fn route_to_geojson_string(
    search: &RouteSearch<'_>,
    outcome: &RouteOutcome,
) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(search, outcome)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_endpoint_feature(role: &str, snapped: &SnappedPoint) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&snapped.location));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "feature_type": role,
            "segment": [snapped.segment.0, snapped.segment.1],
            "interpolation": snapped.interpolation,
            "snap_distance_m": snapped.distance_m,
        }
    });

    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, RoadGraph, TravelMode, Way, find_route};

    fn graph() -> RoadGraph {
        let nodes = vec![
            Node::new(1, 52.000, 4.000),
            Node::new(2, 52.000, 4.001),
            Node::new(3, 52.001, 4.001),
        ];
        let ways = vec![Way::new(10, vec![1, 2, 3]).with_tag("highway", "service")];
        RoadGraph::build(nodes, &ways)
    }

    #[test]
    fn exports_route_line_and_markers() {
        let graph = graph();
        let origin = SnappedPoint::on_segment(&graph, 1, 2, 0.5).unwrap();
        let destination = SnappedPoint::on_segment(&graph, 2, 3, 0.5).unwrap();
        let mut search = find_route(&graph, origin, destination, TravelMode::Car);
        let outcome = search.run_to_end();

        let collection = route_to_geojson(&search, &outcome).unwrap();
        assert_eq!(collection.features.len(), 3);

        let route = &collection.features[0];
        let encoded = serde_json::to_value(route).unwrap();
        assert_eq!(encoded["geometry"]["type"], json!("LineString"));
        let coordinates = encoded["geometry"]["coordinates"].as_array().unwrap();
        assert_eq!(coordinates.len(), 3);
        assert_eq!(
            coordinates[0],
            json!([origin.location.x(), origin.location.y()])
        );
        assert_eq!(coordinates[1], json!([4.001, 52.000]));
        assert_eq!(route.property("mode"), Some(&json!("car")));
        assert_eq!(
            route.property("total_cost_minutes"),
            Some(&json!(outcome.total_cost))
        );
        assert_eq!(
            collection.features[2].property("feature_type"),
            Some(&json!("destination"))
        );

        let text = route_to_geojson_string(&search, &outcome).unwrap();
        assert!(text.contains("FeatureCollection"));
    }

    #[test]
    fn missing_route_is_an_error() {
        let graph = graph();
        let origin = SnappedPoint::on_segment(&graph, 1, 2, 0.5).unwrap();
        let search = find_route(&graph, origin, origin, TravelMode::Pedestrian);
        let outcome = RouteOutcome {
            path: Vec::new(),
            total_cost: f64::INFINITY,
            explored: 0,
        };

        assert!(matches!(
            route_to_geojson(&search, &outcome),
            Err(Error::InvalidData(_))
        ));
    }
}
