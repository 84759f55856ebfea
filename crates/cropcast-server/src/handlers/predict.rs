//! The prediction endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use cropcast_core::{FeatureRecord, Prediction};
use tracing::error;

use crate::error::AppError;
use crate::state::ServerState;

/// Runs one prediction.
///
/// A body that fails schema validation never reaches the wrapper; any
/// wrapper failure is logged with its cause and collapsed into the
/// generic 500 response.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<FeatureRecord>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    let Json(features) = payload?;

    let result = state.wrapper.predict_one(&features).map_err(|e| {
        error!("Prediction failed: {}", e);
        AppError::Prediction
    })?;

    Ok(Json(result))
}
