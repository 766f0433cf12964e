//! HTTP routes and their request/response bodies

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use geo::Point;
use routeviz_core::{
    HeuristicKind, NodeId, PointSnapper, RoadGraph, RouteSearch, RouteStep, SearchOptions,
    SnappedPoint, TravelMode, route_to_geojson,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared read-only state of all handlers
#[derive(Debug)]
pub struct AppState {
    graph: RoadGraph,
    snap_radius_m: f64,
    search: SearchOptions,
}

impl AppState {
    pub fn new(graph: RoadGraph, snap_radius_m: f64, search: SearchOptions) -> Self {
        Self {
            graph,
            snap_radius_m,
            search,
        }
    }

    pub fn from_config(graph: RoadGraph, config: &ServerConfig) -> Self {
        Self::new(graph, config.snapping.max_radius_m, config.search_options())
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    fn snap(
        &self,
        at: LatLon,
        mode: TravelMode,
        radius_m: Option<f64>,
    ) -> Result<SnappedPoint, ApiError> {
        at.validate()?;
        let radius_m = radius_m.unwrap_or(self.snap_radius_m);
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(ApiError::InvalidParameter(format!(
                "max_radius_m must be a positive number, got {radius_m}"
            )));
        }

        PointSnapper::new(&self.graph)
            .with_max_radius(radius_m)
            .snap_to_road(at.into(), mode)
            .ok_or(ApiError::NoRoadNearby {
                mode,
                lat: at.lat,
                lon: at.lon,
                radius_m,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    fn validate(self) -> Result<(), ApiError> {
        let valid = self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon);
        if valid {
            Ok(())
        } else {
            Err(ApiError::InvalidCoordinates {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }
}

impl From<LatLon> for Point<f64> {
    fn from(at: LatLon) -> Self {
        Point::new(at.lon, at.lat)
    }
}

impl From<Point<f64>> for LatLon {
    fn from(point: Point<f64>) -> Self {
        Self {
            lat: point.y(),
            lon: point.x(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapRequest {
    pub lat: f64,
    pub lon: f64,
    pub mode: TravelMode,
    pub max_radius_m: Option<f64>,
}

/// Snapped point in marker-friendly form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapView {
    pub lat: f64,
    pub lon: f64,
    pub segment: [NodeId; 2],
    pub interpolation: f64,
    pub distance_m: f64,
}

impl From<&SnappedPoint> for SnapView {
    fn from(snapped: &SnappedPoint) -> Self {
        let at = LatLon::from(snapped.location);
        Self {
            lat: at.lat,
            lon: at.lon,
            segment: [snapped.segment.0, snapped.segment.1],
            interpolation: snapped.interpolation,
            distance_m: snapped.distance_m,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub origin: LatLon,
    pub destination: LatLon,
    pub mode: TravelMode,
    /// Overrides the configured heuristic
    pub heuristic: Option<HeuristicKind>,
}

/// Search step with the coordinates of the explored vertex
#[derive(Debug, Serialize)]
pub struct StepView {
    #[serde(flatten)]
    pub step: RouteStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLon>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub mode: TravelMode,
    pub origin: SnapView,
    pub destination: SnapView,
    pub found: bool,
    /// `null` when no route exists
    pub total_cost_minutes: Option<f64>,
    pub explored: usize,
    pub path: Vec<LatLon>,
    pub steps: Vec<StepView>,
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
}

/// API routes without middleware
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/graph", get(graph_summary))
        .route("/snap", post(snap))
        .route("/route", post(route))
        .route("/route/geojson", post(route_geojson))
        .with_state(state)
}

/// API routes with tracing, CORS and a global concurrency limit
pub fn app(state: Arc<AppState>, max_concurrent_requests: usize) -> Router {
    router(state)
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn graph_summary(State(state): State<Arc<AppState>>) -> Json<GraphSummary> {
    Json(GraphSummary {
        nodes: state.graph.node_count(),
        edges: state.graph.edge_count(),
    })
}

async fn snap(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SnapRequest>,
) -> Result<Json<SnapView>, ApiError> {
    let at = LatLon {
        lat: request.lat,
        lon: request.lon,
    };
    let snapped = state.snap(at, request.mode, request.max_radius_m)?;
    Ok(Json(SnapView::from(&snapped)))
}

async fn route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || plan_route(&state, &request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(response))
}

async fn route_geojson(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> Result<Response, ApiError> {
    tokio::task::spawn_blocking(move || {
        let mut search = prepare_search(&state, &request)?;
        let outcome = search.run_to_end();
        if !outcome.is_found() {
            return Err(ApiError::NoRoute { mode: request.mode });
        }
        let collection = route_to_geojson(&search, &outcome)?;
        Ok(Json(collection).into_response())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
}

/// Snaps both ends of the request onto the graph
fn prepare_search<'g>(
    state: &'g AppState,
    request: &RouteRequest,
) -> Result<RouteSearch<'g>, ApiError> {
    let origin = state.snap(request.origin, request.mode, None)?;
    let destination = state.snap(request.destination, request.mode, None)?;
    let options = SearchOptions {
        heuristic: request.heuristic.unwrap_or(state.search.heuristic),
    };

    Ok(RouteSearch::new(
        &state.graph,
        origin,
        destination,
        request.mode,
        options,
    ))
}

/// Runs the search to completion, keeping every step
fn plan_route(state: &AppState, request: &RouteRequest) -> Result<RouteResponse, ApiError> {
    let mut search = prepare_search(state, request)?;
    let steps: Vec<RouteStep> = search.by_ref().collect();
    let outcome = search.run_to_end();

    let steps = steps
        .into_iter()
        .map(|step| {
            let location = match &step {
                RouteStep::Explore { node, .. } => search.location_of(*node).map(LatLon::from),
                RouteStep::Complete { .. } => None,
            };
            StepView { step, location }
        })
        .collect();
    let path = outcome
        .path
        .iter()
        .filter_map(|&node| search.location_of(node))
        .map(LatLon::from)
        .collect();

    debug!(
        mode = %request.mode,
        explored = outcome.explored,
        found = outcome.is_found(),
        "Route search finished"
    );

    Ok(RouteResponse {
        mode: request.mode,
        origin: SnapView::from(search.origin()),
        destination: SnapView::from(search.destination()),
        found: outcome.is_found(),
        total_cost_minutes: outcome.is_found().then_some(outcome.total_cost),
        explored: outcome.explored,
        path,
        steps,
    })
}
