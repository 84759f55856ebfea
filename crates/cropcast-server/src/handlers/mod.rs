pub mod predict;

pub use predict::predict;

use crate::dto::StatusResponse;
use axum::Json;

const GREETING: &str =
    "Hi there! I'm classification API. I can help you choose what crop to plant.";

/// Static status endpoint; succeeds regardless of model state.
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: GREETING.to_string(),
    })
}
