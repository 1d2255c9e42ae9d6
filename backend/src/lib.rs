pub mod arc;
pub mod config;
pub mod error;
pub mod gpx_export;
pub mod loader;
pub mod models;
pub mod parser;
pub mod route;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{ClientConfig, PublicConfig};
use crate::error::LoadError;
use crate::gpx_export::encode_trip_as_gpx;
use crate::loader::parse_trip_slice;
use crate::models::{ApiError, ParsedTrip, TripView};
use crate::route::{camera_position, summarize, trip_path};

pub use crate::arc::interpolate_arc;
pub use crate::parser::parse_trip;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ClientConfig>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trips", post(trip_handler))
        .route("/api/config", get(config_handler))
        .layer(cors)
        .with_state(state)
}

/// Everything the globe needs for a trip, computed in one pass.
pub fn build_trip_view(trip: ParsedTrip) -> Result<TripView, error::ExportError> {
    let path = trip_path(&trip);
    let camera = camera_position(&trip);
    let summary = summarize(&trip);
    let gpx_base64 = encode_trip_as_gpx(&trip)?;
    Ok(TripView {
        trip,
        path,
        camera,
        summary,
        gpx_base64,
    })
}

async fn trip_handler(body: Bytes) -> Result<Json<TripView>, (StatusCode, Json<ApiError>)> {
    let trip = parse_trip_slice(&body).map_err(load_error)?;
    tracing::info!(
        "trip {:?}: {} segments from {} to {}",
        trip.title(),
        trip.segments().len(),
        trip.start_time(),
        trip.end_time()
    );

    let view = build_trip_view(trip).map_err(|err| {
        tracing::error!("failed to export trip: {err}");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    })?;
    Ok(Json(view))
}

async fn config_handler(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.client.public_view())
}

fn load_error(err: LoadError) -> (StatusCode, Json<ApiError>) {
    let status = match err {
        LoadError::Trip(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LoadError::Json(_) | LoadError::NotJson(_) => StatusCode::BAD_REQUEST,
        LoadError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!("rejected trip document: {err}");
    api_error(status, err.to_string())
}

fn api_error(status: StatusCode, message: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { message }))
}
