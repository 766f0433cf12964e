use std::time::Instant;

use log::info;

use super::config::RoadGraphConfig;
use super::map_data::MapData;
use crate::{Error, RoadGraph};

/// Reads the map file named in `config` and builds the road graph
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not valid map JSON
pub fn create_road_graph(config: &RoadGraphConfig) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!("Loading map data: {}", config.map_path.display());
    let started = Instant::now();

    let data = MapData::from_path(&config.map_path)?;
    let graph = data.into_graph(config.graph_options());

    info!(
        "Road graph ready in {:.2?}: {} nodes, {} edges",
        started.elapsed(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn validate_config(config: &RoadGraphConfig) -> Result<(), Error> {
    if !config.map_path.exists() {
        return Err(Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Map file not found: {}", config.map_path.display()),
        )));
    }

    if !config.map_path.is_file() {
        return Err(Error::InvalidData(format!(
            "Map path is not a file: {}",
            config.map_path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::TravelMode;

    #[test]
    fn builds_graph_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": 1, "lat": 0.0, "lon": 0.0}}, {{"id": 2, "lat": 0.0, "lon": 0.001}}],
               "ways": [{{"id": 1, "nodes": [1, 2], "tags": {{"highway": "footway", "oneway": "yes"}}}}]}}"#
        )
        .unwrap();

        let mut config = RoadGraphConfig::new(file.path());
        let strict = create_road_graph(&config).unwrap();
        assert_eq!(strict.edge_count(), 1);

        config.oneway_exempt_modes = true;
        let exempt = create_road_graph(&config).unwrap();
        assert_eq!(exempt.edge_count(), 2);
        assert!(exempt.edge_cost(2, 1, TravelMode::Pedestrian).is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = RoadGraphConfig::new("/nonexistent/routeviz/map.json");
        assert!(matches!(
            create_road_graph(&config),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = RoadGraphConfig::new(dir.path());
        assert!(matches!(
            create_road_graph(&config),
            Err(Error::InvalidData(_))
        ));
    }
}
