//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::candidate::resolver::{resolve, ResolutionReport, Resolver};
use crate::candidate::{LocationCandidate, PendingTap, RemotePoi, SavedPlace};
use crate::coord::radius::RadiusPolicy;
use crate::coord::zoom::ZoomLevel;
use crate::coord::{Coordinate, Viewport};
use crate::enrich::EnrichmentUpdate;
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::server::state::AppState;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/resolve", post(resolve_handler))
        .route("/api/search", post(search_handler))
        .route("/api/enrich", post(enrich_handler))
        .route("/api/radius", get(radius_handler))
        .route("/api/activate", post(activate_handler))
        .route("/api/places", get(places_handler).post(add_place_handler))
        .route("/api/places/:id", delete(delete_place_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "PROVIDER_UNAVAILABLE" => StatusCode::BAD_GATEWAY,
            "STORE_ERROR" | "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::ProviderUnavailable(_) | Error::Geocoding(_) | Error::Http(_) => {
                "PROVIDER_UNAVAILABLE"
            }
            Error::Config(_) => "CONFIG_ERROR",
            Error::Store(_) => "STORE_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError::new(code, err.to_string())
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Geocoding provider base URL
    pub provider: String,
    /// Number of saved places
    pub saved_places: usize,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let provider = state.config.read().await.geocode.base_url.clone();
    let saved_places = state.places.read().await.len();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider,
        saved_places,
    })
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Pure resolution request: the caller supplies every input
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub viewport: Viewport,
    pub query: Option<String>,
    pub tap: Option<PendingTap>,
    #[serde(default)]
    pub saved_places: Vec<SavedPlace>,
    #[serde(default)]
    pub search_results: Vec<RemotePoi>,
}

/// Ranked candidates plus the radius a live search would have used
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub radius_meters: f64,
    pub candidates: Vec<LocationCandidate>,
}

/// Rank already-fetched inputs
///
/// POST /api/resolve
async fn resolve_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, ApiError> {
    req.viewport.validate()?;
    if let Some(tap) = &req.tap {
        tap.coordinate.validate()?;
    }

    let policy = state.config.read().await.search.radius_policy();
    let candidates = resolve(
        &req.viewport,
        req.query.as_deref(),
        req.tap.as_ref(),
        &req.saved_places,
        &req.search_results,
    );

    Ok(Json(ResolveResponse {
        radius_meters: policy.radius_meters(&req.viewport),
        candidates,
    }))
}

/// Live resolution request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub viewport: Viewport,
    pub query: Option<String>,
    pub tap: Option<PendingTap>,
}

/// Resolve against the configured provider and the saved-place store
///
/// POST /api/search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ResolutionReport>, ApiError> {
    let (policy, limit) = {
        let config = state.config.read().await;
        (config.search.radius_policy(), config.search.limit)
    };
    let saved = state.places.read().await.places().to_vec();

    let report = Resolver::new(state.provider(), saved.as_slice())
        .with_radius_policy(policy)
        .with_limit(limit)
        .resolve(&req.viewport, req.query.as_deref(), req.tap.as_ref())
        .await?;

    Ok(Json(report))
}

/// Enrichment request for one activated candidate
#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    pub candidate: LocationCandidate,
}

/// Every status transition, in order
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrichResponse {
    pub updates: Vec<EnrichmentUpdate>,
}

/// Reverse geocode a candidate
///
/// POST /api/enrich
async fn enrich_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrichRequest>,
) -> Result<Json<EnrichResponse>, ApiError> {
    req.candidate.coordinate.validate()?;

    let enricher = state.enricher().await;
    let updates = enricher.enrich(req.candidate).collect().await;

    Ok(Json(EnrichResponse { updates }))
}

/// Viewport given as query parameters
#[derive(Debug, Deserialize)]
pub struct RadiusQuery {
    pub lat: f64,
    pub lng: f64,
    pub lat_span: Option<f64>,
    pub lng_span: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RadiusResponse {
    pub radius_meters: f64,
    pub viewport_width_meters: f64,
    pub min_meters: f64,
    pub max_meters: f64,
}

/// Search radius for a viewport
///
/// GET /api/radius
async fn radius_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RadiusQuery>,
) -> Result<Json<RadiusResponse>, ApiError> {
    let (policy, default_span) = {
        let config = state.config.read().await;
        (config.search.radius_policy(), config.search.default_span)
    };

    let viewport = Viewport::new(
        Coordinate::new(query.lat, query.lng),
        query.lat_span.unwrap_or(default_span),
        query.lng_span.unwrap_or(default_span),
    );
    viewport.validate()?;

    Ok(Json(RadiusResponse {
        radius_meters: policy.radius_meters(&viewport),
        viewport_width_meters: RadiusPolicy::viewport_width_meters(&viewport),
        min_meters: policy.min_meters,
        max_meters: policy.max_meters,
    }))
}

/// Candidate the user activated in the list
///
/// Clients that share a server send a `session` to keep their zoom cycles
/// apart; requests without one share the default session.
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub candidate_id: String,
    pub coordinate: Coordinate,
    #[serde(default = "default_session")]
    pub session: String,
}

fn default_session() -> String {
    "default".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivateResponse {
    pub level: ZoomLevel,
    pub viewport: Viewport,
}

/// Advance the zoom cycle for a candidate
///
/// POST /api/activate
async fn activate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<ActivateResponse>, ApiError> {
    req.coordinate.validate()?;

    let level = state.activate_zoom(&req.session, &req.candidate_id).await;

    Ok(Json(ActivateResponse {
        level,
        viewport: level.viewport(req.coordinate),
    }))
}

/// Saved places list response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<SavedPlace>,
    pub count: usize,
}

/// Get saved places
///
/// GET /api/places
async fn places_handler(State(state): State<Arc<AppState>>) -> Json<PlacesResponse> {
    let store = state.places.read().await;
    Json(PlacesResponse {
        places: store.places().to_vec(),
        count: store.len(),
    })
}

/// New saved place request
#[derive(Debug, Deserialize)]
pub struct AddPlaceRequest {
    pub name: String,
    pub coordinate: Coordinate,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Save a new place
///
/// POST /api/places
async fn add_place_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddPlaceRequest>,
) -> Result<(StatusCode, Json<SavedPlace>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::new("INVALID_PLACE", "Place name must not be empty"));
    }

    let mut place = SavedPlace::new(uuid::Uuid::new_v4().to_string(), req.name, req.coordinate);
    place.address = req.address;
    place.city = req.city;
    place.created_at = Some(chrono::Utc::now());

    let mut store = state.places.write().await;
    store.add(place.clone())?;
    store.save()?;

    Ok((StatusCode::CREATED, Json(place)))
}

/// Delete a saved place
///
/// DELETE /api/places/:id
async fn delete_place_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.places.write().await;

    if store.remove(&id).is_none() {
        return Err(ApiError::new(
            "NOT_FOUND",
            format!("Saved place not found: {}", id),
        ));
    }
    store.save()?;
    Ok(StatusCode::NO_CONTENT)
}
