//! HTTP response DTOs.
//!
//! The predict request and response bodies are the core domain types
//! ([`cropcast_core::FeatureRecord`] and [`cropcast_core::Prediction`]);
//! only the status payload is server-specific.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}
