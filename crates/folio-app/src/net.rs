#![forbid(unsafe_code)]

//! Network-backed location provider.
//!
//! One unauthenticated GET with a hard timeout, run from a background task
//! thread. Every failure mode maps to a [`GeoError`]; the caller substitutes
//! the fallback string, so nothing here can reach the user as an error.

use std::time::Duration;

use folio_core::geo::{GeoError, GeoReply, LOOKUP_URL, LocationProvider};

/// Hard ceiling on the lookup round-trip.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Blocking client for the IP-geolocation endpoint.
pub struct IpapiClient {
    client: Option<reqwest::blocking::Client>,
}

impl IpapiClient {
    /// Build the client; construction failure degrades to "lookup fails".
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .ok();
        if client.is_none() {
            tracing::warn!("http client construction failed, lookups disabled");
        }
        Self { client }
    }
}

impl Default for IpapiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationProvider for IpapiClient {
    fn lookup(&self) -> Result<GeoReply, GeoError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| GeoError::Network("client unavailable".to_string()))?;
        let response = client
            .get(LOOKUP_URL)
            .send()
            .map_err(|e| GeoError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(GeoError::Network(format!("status {}", response.status())));
        }
        response
            .json::<GeoReply>()
            .map_err(|e| GeoError::Decode(e.to_string()))
    }
}
