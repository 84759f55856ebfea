//! HTTP prediction service for cropcast.
//!
//! Wires the [`cropcast_core::ModelWrapper`] behind two routes: a static
//! status endpoint and `POST /predict`. The router is built by [`app`]
//! from an explicitly constructed [`ServerState`], so tests can drive it
//! with `tower::ServiceExt::oneshot` and `main` stays a thin startup shim.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

pub use state::ServerState;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{HeaderValue, InvalidHeaderValue};
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

/// Path of the serialized pipeline artifact, relative to the working dir.
pub const MODEL_PATH: &str = "models/model.json";

/// Path of the serialized label encoder artifact.
pub const ENCODER_PATH: &str = "models/encoder.json";

/// Builds the application router over the shared server state.
pub fn app(state: Arc<ServerState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::root))
        .route("/predict", post(handlers::predict))
        .layer(trace_layer)
        .with_state(state)
}

/// CORS layer allow-listing a single origin with credentials.
///
/// Methods and headers mirror the request rather than using a wildcard;
/// tower-http rejects wildcards once credentials are allowed.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
