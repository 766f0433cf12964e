use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use routeviz_core::TravelMode;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a request, rendered as a JSON body with a matching status
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Coordinates out of range: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("No {mode} road within {radius_m} m of ({lat}, {lon})")]
    NoRoadNearby {
        mode: TravelMode,
        lat: f64,
        lon: f64,
        radius_m: f64,
    },
    #[error("No {mode} route between the snapped points")]
    NoRoute { mode: TravelMode },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCoordinates { .. } | ApiError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NoRoadNearby { .. } | ApiError::NoRoute { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<routeviz_core::Error> for ApiError {
    fn from(err: routeviz_core::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
