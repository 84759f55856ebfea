//! Application error types and Axum response conversion.

use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Client-visible prediction failure message. The structured cause is
/// logged server-side and never put on the wire.
const PREDICTION_ERROR_DETAIL: &str = "Error doing the prediction.";

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed schema validation (missing or mistyped field).
    Validation(String),
    /// Anything that went wrong between feature conversion and label
    /// decoding, collapsed to one generic response.
    Prediction,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Serialize)]
struct ValidationItem {
    msg: String,
}

#[derive(Serialize)]
struct ValidationResponse {
    detail: Vec<ValidationItem>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse {
                    detail: vec![ValidationItem { msg }],
                }),
            )
                .into_response(),
            AppError::Prediction => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: PREDICTION_ERROR_DETAIL.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
