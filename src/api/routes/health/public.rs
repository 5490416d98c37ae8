//! Public types for the health API

use serde::Serialize;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub telemost_api: &'static str,
}
