use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Malformed map data: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
