//! Geocoding provider port and wire types.
//!
//! The provider answers with the raw status and result list. Deciding what
//! counts as a usable answer is the stage's job, not the adapter's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resolved position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Provider reply body.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,
}

/// Failure to obtain a reply from the provider at all.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(reqwest::Error),

    #[error("geocoding provider answered HTTP {0}")]
    Status(reqwest::StatusCode),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        GeocodeError::Request(err.without_url())
    }
}

/// Outbound port for free-text address lookup.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<GeocodeResponse, GeocodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_reply() {
        let body = r#"{"status":"OK","results":[{"geometry":{"location":{"lat":37.1,"lng":-121.9}},"place_id":"abc"}]}"#;
        let reply: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results[0].geometry.location, Coordinates { lat: 37.1, lng: -121.9 });
    }

    #[test]
    fn test_decode_error_reply_without_results() {
        let body = r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#;
        let reply: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert!(reply.results.is_empty());
        assert_eq!(reply.error_message.as_deref(), Some("The provided API key is invalid."));
    }
}
