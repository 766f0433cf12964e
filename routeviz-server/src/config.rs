//! Server configuration read from TOML and merged with command line overrides

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use routeviz_core::{DEFAULT_SNAP_RADIUS, HeuristicKind, RoadGraphConfig, SearchOptions};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("No map file configured: set [map] path or pass --map")]
    MissingMap,
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub map: MapSection,
    pub snapping: SnappingSection,
    pub search: SearchSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    /// Requests handled at the same time across all routes
    pub max_concurrent_requests: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            max_concurrent_requests: 64,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MapSection {
    pub path: Option<PathBuf>,
    pub oneway_exempt_modes: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnappingSection {
    /// Default snapping radius in meters
    pub max_radius_m: f64,
}

impl Default for SnappingSection {
    fn default() -> Self {
        Self {
            max_radius_m: DEFAULT_SNAP_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub heuristic: HeuristicKind,
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reads the file named on the command line, if any, and applies overrides
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(map) = &cli.map {
            config.map.path = Some(map.clone());
        }
        if let Some(bind) = cli.bind {
            config.server.bind = bind;
        }

        Ok(config)
    }

    pub fn road_graph_config(&self) -> Result<RoadGraphConfig, ConfigError> {
        let path = self.map.path.as_ref().ok_or(ConfigError::MissingMap)?;
        Ok(RoadGraphConfig {
            map_path: path.clone(),
            oneway_exempt_modes: self.map.oneway_exempt_modes,
        })
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            heuristic: self.search.heuristic,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let radius = self.snapping.max_radius_m;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "snapping.max_radius_m",
                reason: format!("expected a positive number of meters, got {radius}"),
            });
        }
        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_concurrent_requests",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
