#![forbid(unsafe_code)]

//! Location display resolution.
//!
//! The chrome shows a coarse "City, CC" string resolved from an
//! IP-geolocation lookup. Resolution order: profile cache, then one provider
//! call, then the static fallback. Failures are never surfaced; a failed
//! lookup yields [`FALLBACK_LOCATION`] for the session and is not cached, so
//! a later launch gets one fresh attempt.
//!
//! The provider is a trait so the network client stays out of this crate and
//! tests can substitute canned replies.

use std::fmt;

use serde::Deserialize;

use crate::store::{self, ProfileStore, keys};

/// Shown when no lookup result is available.
pub const FALLBACK_LOCATION: &str = "Global";

/// Lookup endpoint consumed by the network provider.
pub const LOOKUP_URL: &str = "https://ipapi.co/json/";

/// Errors from a location provider.
#[derive(Debug)]
pub enum GeoError {
    /// Transport-level failure (timeout, DNS, refused).
    Network(String),
    /// The reply could not be decoded.
    Decode(String),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Network(msg) => write!(f, "lookup failed: {msg}"),
            GeoError::Decode(msg) => write!(f, "lookup reply invalid: {msg}"),
        }
    }
}

impl std::error::Error for GeoError {}

/// The subset of the lookup reply the chrome needs.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoReply {
    pub city: String,
    pub country_code: String,
}

impl GeoReply {
    /// Display form, e.g. `"Kolkata, IN"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}, {}", self.city, self.country_code)
    }
}

/// A one-shot IP-geolocation lookup.
pub trait LocationProvider {
    fn lookup(&self) -> Result<GeoReply, GeoError>;
}

/// Resolve the location display string for this profile.
///
/// Successful lookups are cached under [`keys::LOCATION`]; failures resolve
/// to [`FALLBACK_LOCATION`] without touching the cache. Never errors.
pub fn resolve_location(store: &dyn ProfileStore, provider: &dyn LocationProvider) -> String {
    if let Some(cached) = store::get_or_absent(store, keys::LOCATION) {
        tracing::debug!(location = %cached, "location from cache");
        return cached;
    }

    match provider.lookup() {
        Ok(reply) => {
            let display = reply.display();
            if let Err(e) = store.set(keys::LOCATION, &display) {
                tracing::warn!(error = %e, "could not cache location");
            }
            display
        }
        Err(e) => {
            tracing::debug!(error = %e, "location lookup failed, using fallback");
            FALLBACK_LOCATION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct Canned(Result<GeoReply, GeoError>);

    impl LocationProvider for Canned {
        fn lookup(&self) -> Result<GeoReply, GeoError> {
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(GeoError::Network(m)) => Err(GeoError::Network(m.clone())),
                Err(GeoError::Decode(m)) => Err(GeoError::Decode(m.clone())),
            }
        }
    }

    fn kolkata() -> GeoReply {
        GeoReply {
            city: "Kolkata".to_string(),
            country_code: "IN".to_string(),
        }
    }

    #[test]
    fn cache_hit_skips_provider() {
        struct Panicking;
        impl LocationProvider for Panicking {
            fn lookup(&self) -> Result<GeoReply, GeoError> {
                panic!("provider must not be called on a cache hit");
            }
        }

        let store = MemoryStore::new();
        store.set(keys::LOCATION, "Berlin, DE").unwrap();
        assert_eq!(resolve_location(&store, &Panicking), "Berlin, DE");
    }

    #[test]
    fn success_caches_display_string() {
        let store = MemoryStore::new();
        let resolved = resolve_location(&store, &Canned(Ok(kolkata())));
        assert_eq!(resolved, "Kolkata, IN");
        assert_eq!(
            store.get(keys::LOCATION).unwrap().as_deref(),
            Some("Kolkata, IN")
        );
    }

    #[test]
    fn failure_falls_back_without_caching() {
        let store = MemoryStore::new();
        let resolved =
            resolve_location(&store, &Canned(Err(GeoError::Network("timeout".into()))));
        assert_eq!(resolved, FALLBACK_LOCATION);
        assert!(store.get(keys::LOCATION).unwrap().is_none());
    }

    #[test]
    fn reply_decodes_from_ipapi_shape() {
        let json = r#"{"ip":"1.2.3.4","city":"Kolkata","region":"West Bengal",
                       "country_code":"IN","latitude":22.57,"longitude":88.36}"#;
        let reply: GeoReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.display(), "Kolkata, IN");
    }
}
